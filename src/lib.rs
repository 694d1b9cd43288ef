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

//! ilofan - fan control TUI for HP iLO controllers
//!
//! Talks to a small REST service in front of the iLO: read fan-block speeds,
//! edit them locally, push them back, or unlock manual fan control.

pub mod api;
pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod logger;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
