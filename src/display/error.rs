/*
 *  display/error.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the render pipeline
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt;
use std::error::Error;

/// Failures while capturing or restoring the dial snapshot.
///
/// None of these stop a frame; the pipeline falls back to a full redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// The snapshot buffer could not be allocated
    AllocationFailed { bytes: usize },

    /// Canvas raster does not match the captured snapshot
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::AllocationFailed { bytes } =>
                write!(f, "Background snapshot allocation of {} bytes failed", bytes),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} pixels, got {}", expected, actual),
        }
    }
}

impl Error for DisplayError {}
