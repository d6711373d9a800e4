// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type every fallible operation in the crate returns.

use std::io;

/// Everything that can stop a plot from reaching the disk.  Numeric
/// trouble (NaN, infinities) is not in here: the color rules absorb
/// it.
#[derive(Debug, Fail)]
pub enum PlotError {
    /// The output file could not be created, written or renamed.
    #[fail(display = "I/O failure: {}", _0)]
    Io(#[cause] io::Error),

    /// A raster file could not be decoded.
    #[fail(display = "could not decode image: {}", _0)]
    Decode(#[cause] ::image::ImageError),

    /// The integral plane has no pixels in it.
    #[fail(display = "the image must be at least 1x1, got {}x{}", width, height)]
    EmptyPlane {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// The complex window is inverted or has no area.
    #[fail(display = "{}", _0)]
    InvertedPlane(String),

    /// A corner of the complex window is NaN or infinite.
    #[fail(display = "the corners of the complex plane must be finite")]
    NonFinitePlane,

    /// A render worker panicked, so the raster is incomplete.
    #[fail(display = "a render thread panicked; no output was written")]
    WorkerPanicked,
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> PlotError {
        PlotError::Io(err)
    }
}

impl From<::image::ImageError> for PlotError {
    fn from(err: ::image::ImageError) -> PlotError {
        PlotError::Decode(err)
    }
}
