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

use serde_json::json;

use crate::api::{clamp_percent, FanApi};
use crate::controls::{self, Control};
use crate::logger::log_event;

/// Fan blocks assumed when the controller cannot be reached at startup
pub const FALLBACK_NUM_FANS: usize = 8;
pub const FALLBACK_PERCENT: u8 = 35;

/// Percentage points per left/right press
pub const SLIDER_STEP: i32 = 5;

/// Everything the control panel knows: current and committed fan values,
/// the selection cursor and the last status line.
///
/// `fans` and `baseline_fans` always have the same length, fixed at load,
/// and every value is within `0..=100`.
pub struct App {
    client: Box<dyn FanApi>,
    base_url: String,
    fans: Vec<u8>,
    baseline_fans: Vec<u8>,
    edit_all: bool,
    selected_index: usize,
    status: String,
}

impl App {
    /// Build the state by loading from the controller. Never fails: an
    /// unreachable controller yields the local defaults instead.
    pub fn new(client: Box<dyn FanApi>, base_url: impl Into<String>) -> Self {
        let mut app = Self {
            client,
            base_url: base_url.into(),
            fans: Vec::new(),
            baseline_fans: Vec::new(),
            edit_all: false,
            selected_index: 0,
            status: String::from("Loading fan data from API..."),
        };
        app.load();
        app
    }

    fn load(&mut self) {
        match self.client.fetch_fans() {
            Ok(fans) if !fans.is_empty() => {
                let fans: Vec<u8> = fans.into_iter().map(|v| v.min(100)).collect();
                self.status = format!("Loaded {} fan blocks from API.", fans.len());
                log_event("load", json!({ "fans": fans }));
                self.baseline_fans = fans.clone();
                self.fans = fans;
            }
            Ok(_) => self.load_fallback("API returned no fan blocks"),
            Err(e) => self.load_fallback(&e.to_string()),
        }
        self.selected_index = self.selected_index.min(self.max_index());
    }

    fn load_fallback(&mut self, reason: &str) {
        self.fans = vec![FALLBACK_PERCENT; FALLBACK_NUM_FANS];
        self.baseline_fans = self.fans.clone();
        self.status = format!(
            "API error: {}. Using local defaults ({}x{}%).",
            reason, FALLBACK_NUM_FANS, FALLBACK_PERCENT
        );
        log_event("load_fallback", json!({ "error": reason }));
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fans(&self) -> &[u8] {
        &self.fans
    }

    pub fn baseline_fans(&self) -> &[u8] {
        &self.baseline_fans
    }

    pub fn num_fans(&self) -> usize {
        self.fans.len()
    }

    pub fn edit_all(&self) -> bool {
        self.edit_all
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn max_index(&self) -> usize {
        controls::max_index(self.num_fans())
    }

    pub fn selected_control(&self) -> Control {
        controls::control_at(self.selected_index, self.num_fans()).unwrap_or(Control::EditAll)
    }

    /// Has anything been edited since the last load or successful update?
    pub fn is_dirty(&self) -> bool {
        self.fans != self.baseline_fans
    }

    pub fn is_fan_dirty(&self, idx: usize) -> bool {
        self.fans.get(idx) != self.baseline_fans.get(idx)
    }

    /// Put the cursor on `control`. Returns false if it does not exist.
    #[cfg(test)]
    pub fn select(&mut self, control: Control) -> bool {
        match controls::index_of(control, self.num_fans()) {
            Some(idx) => {
                self.selected_index = idx;
                true
            }
            None => false,
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        self.selected_index = controls::clamp_selection(self.selected_index, delta, self.num_fans());
    }

    /// Nudge the selected fan block (or all of them in edit-all mode).
    /// Nothing happens unless a fan block is selected.
    pub fn change_slider(&mut self, delta: i32) {
        let Control::Fan(idx) = self.selected_control() else {
            return;
        };
        let Some(&current) = self.fans.get(idx) else {
            return;
        };
        let new_val = clamp_percent(i64::from(current) + i64::from(delta));
        if self.edit_all {
            self.fans.iter_mut().for_each(|v| *v = new_val);
        } else {
            self.fans[idx] = new_val;
        }
    }

    /// Presets always hit every fan block, edit-all or not.
    pub fn apply_preset(&mut self, value: i32) {
        let value = clamp_percent(i64::from(value));
        self.fans.iter_mut().for_each(|v| *v = value);
        self.status = format!("Preset applied: {}% on all fan blocks.", value);
    }

    pub fn toggle_edit_all(&mut self) {
        self.edit_all = !self.edit_all;
        self.status = format!("Edit All is now {}.", if self.edit_all { "ON" } else { "OFF" });
    }

    /// Push the current values. Only a successful push moves the baseline.
    pub fn do_update(&mut self) {
        match self.client.push_fans(&self.fans) {
            Ok(()) => {
                self.baseline_fans = self.fans.clone();
                self.status = String::from("Fan speeds updated successfully.");
                log_event("update", json!({ "fans": self.fans }));
            }
            Err(e) => {
                self.status = format!("Update failed: {}", e);
                log_event("update_failed", json!({ "error": e.to_string(), "fans": self.fans }));
            }
        }
    }

    pub fn do_reset(&mut self) {
        self.fans = self.baseline_fans.clone();
        self.status = String::from("Values reset to last known baseline.");
    }

    pub fn do_unlock(&mut self) {
        match self.client.unlock() {
            Ok(()) => {
                self.status = String::from("Global fan control unlocked.");
                log_event("unlock", json!({}));
            }
            Err(e) => {
                self.status = format!("Unlock failed: {}", e);
                log_event("unlock_failed", json!({ "error": e.to_string() }));
            }
        }
    }

    pub fn activate_current(&mut self) {
        match self.selected_control() {
            Control::EditAll => self.toggle_edit_all(),
            Control::Preset(preset) => self.apply_preset(preset.value()),
            // sliders only move with left/right
            Control::Fan(_) => {}
            Control::Update => self.do_update(),
            Control::Reset => self.do_reset(),
            Control::Unlock => self.do_unlock(),
        }
    }
}
