/*
 *  display/background.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dial snapshot cache
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

use embedded_graphics::pixelcolor::Rgb888;
use log::debug;

use crate::display::error::DisplayError;
use crate::display::traits::Canvas;

/// Counters for how the background was produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Snapshots taken after a full dial paint
    pub rebuilds: u64,

    /// Frames served by copying the snapshot back
    pub hits: u64,
}

/// Owns the one saved copy of the painted dial.
///
/// `size() == 0` means there is nothing to copy and the next frame has to
/// paint the dial itself. Dropping the cache (or calling `invalidate`)
/// releases the snapshot.
#[derive(Debug)]
pub struct BackgroundCache {
    snapshot: Option<Box<[Rgb888]>>,
    size: usize,
    limit: usize,
    stats: CacheStats,
}

impl Default for BackgroundCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundCache {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Cap the snapshot size in bytes; a capture over the cap fails the
    /// same way a heap allocation failure would.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshot: None,
            size: 0,
            limit,
            stats: CacheStats::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.size != 0
    }

    /// Snapshot size in bytes (row stride x height), zero when invalid
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop the snapshot; the next frame repaints and recaptures.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("background snapshot released ({} bytes)", self.size);
        }
        self.size = 0;
    }

    /// Save the canvas as it stands.
    pub fn capture<C: Canvas>(&mut self, canvas: &C) -> Result<(), DisplayError> {
        self.invalidate();

        let bytes = canvas.capture_size();
        let raster = canvas.raster();
        if bytes == 0 || bytes > self.limit {
            return Err(DisplayError::AllocationFailed { bytes });
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(raster.len())
            .map_err(|_| DisplayError::AllocationFailed { bytes })?;
        buf.extend_from_slice(raster);

        self.snapshot = Some(buf.into_boxed_slice());
        self.size = bytes;
        self.stats.rebuilds += 1;
        debug!("background snapshot captured ({} bytes)", bytes);
        Ok(())
    }

    /// Copy the saved dial back over the whole canvas.
    pub fn restore<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), DisplayError> {
        let Some(snapshot) = self.snapshot.as_deref() else {
            return Err(DisplayError::BufferSizeMismatch { expected: 0, actual: canvas.raster().len() });
        };
        let target = canvas.raster_mut();
        if target.len() != snapshot.len() {
            return Err(DisplayError::BufferSizeMismatch {
                expected: snapshot.len(),
                actual: target.len(),
            });
        }
        target.copy_from_slice(snapshot);
        self.stats.hits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::VarFrameBuf;
    use embedded_graphics::prelude::*;

    #[test]
    fn capture_then_restore() {
        let mut fb = VarFrameBuf::new(10, 10, Rgb888::RED);
        let mut cache = BackgroundCache::new();
        assert!(!cache.is_valid());
        assert_eq!(cache.size(), 0);

        cache.capture(&fb).unwrap();
        assert!(cache.is_valid());
        assert_eq!(cache.size(), 10 * 3 * 10);

        fb.clear_color(Rgb888::BLUE);
        cache.restore(&mut fb).unwrap();
        assert_eq!(fb.pixel(Point::new(5, 5)), Some(Rgb888::RED));
        assert_eq!(cache.stats(), CacheStats { rebuilds: 1, hits: 1 });
    }

    #[test]
    fn invalidate_releases() {
        let fb = VarFrameBuf::new(4, 4, Rgb888::RED);
        let mut cache = BackgroundCache::new();
        cache.capture(&fb).unwrap();
        cache.invalidate();
        assert!(!cache.is_valid());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn over_limit_stays_invalid() {
        let fb = VarFrameBuf::new(16, 16, Rgb888::RED);
        let mut cache = BackgroundCache::with_limit(64);
        let err = cache.capture(&fb).unwrap_err();
        assert_eq!(err, DisplayError::AllocationFailed { bytes: 16 * 16 * 3 });
        assert!(!cache.is_valid());
    }

    #[test]
    fn mismatched_canvas_is_refused() {
        let small = VarFrameBuf::new(4, 4, Rgb888::RED);
        let mut big = VarFrameBuf::new(8, 8, Rgb888::BLUE);
        let mut cache = BackgroundCache::new();
        cache.capture(&small).unwrap();
        assert!(cache.restore(&mut big).is_err());
        assert_eq!(big.pixel(Point::zero()), Some(Rgb888::BLUE));
    }
}
