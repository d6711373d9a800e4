#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex plots
//!
//! A complex-valued function can't be drawn as a graph: both its
//! input and its output are two-dimensional.  What we can do instead
//! is lay a grid of pixels over a window of the complex plane, feed
//! the point under every pixel to the function, and paint the pixel
//! with a color that encodes the answer.  The hue tells the argument
//! of the result and the brightness its modulus, so zeros show up as
//! black points with the whole color wheel wound around them.
//!
//! The same machinery draws the basins of Newton's method: instead
//! of one application of `f`, each pixel is pushed through a fixed
//! number of Newton steps and colored by where it ends up.
//!
//! ```no_run
//! extern crate complex_plots;
//! extern crate num;
//!
//! use complex_plots::colors::color_wheel_from_complex;
//! use num::Complex;
//!
//! fn newton(z: Complex<f64>) -> Complex<f64> {
//!     z - (z * z * z - 1.0) / (z * z * 3.0)
//! }
//!
//! fn main() {
//!     complex_plots::iters_plot(newton, 3, color_wheel_from_complex, "newton.ppm").unwrap();
//! }
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;
extern crate tempfile;

pub mod colors;
pub mod error;
pub mod planes;
pub mod plot;
pub mod raster;

pub use colors::{Color, ColorRule};
pub use error::PlotError;
pub use planes::{Pixel, PlaneMapper};
pub use plot::{complex_plot, iterate, iters_plot, Plotter};
pub use raster::Raster;
