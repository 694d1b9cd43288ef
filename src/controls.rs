/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! The flat, ordered list of selectable controls.
//!
//! `[EditAll, Quiet, Normal, Turbo, Fan(0) .. Fan(n-1), Update, Reset, Unlock]`
//!
//! All index arithmetic is a pure function of the number of fan blocks, which
//! is fixed once the fans are loaded.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    Quiet,
    Normal,
    Turbo,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Quiet, Preset::Normal, Preset::Turbo];

    /// Percentage applied to every fan block
    pub fn value(self) -> i32 {
        match self {
            // 20% tends to overheat 1U boxes with HD controllers
            Preset::Quiet => 30,
            Preset::Normal => 40,
            Preset::Turbo => 80,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Quiet => "Quiet",
            Preset::Normal => "Normal",
            Preset::Turbo => "Turbo",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    EditAll,
    Preset(Preset),
    Fan(usize),
    Update,
    Reset,
    Unlock,
}

pub const IDX_EDIT_ALL: usize = 0;
pub const IDX_QUIET: usize = 1;
pub const IDX_NORMAL: usize = 2;
pub const IDX_TURBO: usize = 3;
pub const FAN_START_IDX: usize = 4;

pub fn idx_update(num_fans: usize) -> usize {
    FAN_START_IDX + num_fans
}

pub fn idx_reset(num_fans: usize) -> usize {
    FAN_START_IDX + num_fans + 1
}

pub fn idx_unlock(num_fans: usize) -> usize {
    FAN_START_IDX + num_fans + 2
}

pub fn max_index(num_fans: usize) -> usize {
    idx_unlock(num_fans)
}

/// Which control sits at `index`, if any.
pub fn control_at(index: usize, num_fans: usize) -> Option<Control> {
    match index {
        IDX_EDIT_ALL => Some(Control::EditAll),
        IDX_QUIET => Some(Control::Preset(Preset::Quiet)),
        IDX_NORMAL => Some(Control::Preset(Preset::Normal)),
        IDX_TURBO => Some(Control::Preset(Preset::Turbo)),
        i if i < FAN_START_IDX + num_fans => Some(Control::Fan(i - FAN_START_IDX)),
        i if i == idx_update(num_fans) => Some(Control::Update),
        i if i == idx_reset(num_fans) => Some(Control::Reset),
        i if i == idx_unlock(num_fans) => Some(Control::Unlock),
        _ => None,
    }
}

/// Inverse of [`control_at`]. `None` for a fan index past the end.
pub fn index_of(control: Control, num_fans: usize) -> Option<usize> {
    match control {
        Control::EditAll => Some(IDX_EDIT_ALL),
        Control::Preset(Preset::Quiet) => Some(IDX_QUIET),
        Control::Preset(Preset::Normal) => Some(IDX_NORMAL),
        Control::Preset(Preset::Turbo) => Some(IDX_TURBO),
        Control::Fan(i) if i < num_fans => Some(FAN_START_IDX + i),
        Control::Fan(_) => None,
        Control::Update => Some(idx_update(num_fans)),
        Control::Reset => Some(idx_reset(num_fans)),
        Control::Unlock => Some(idx_unlock(num_fans)),
    }
}

/// Move `current` by `delta` and clamp into `[0, max_index]`. Never wraps.
pub fn clamp_selection(current: usize, delta: i32, num_fans: usize) -> usize {
    let max = max_index(num_fans) as i64;
    (current as i64 + i64::from(delta)).clamp(0, max) as usize
}
