// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex plots and iterated plots.
//!
//! A complex plot takes every pixel of the image, finds the point
//! `z` on the complex plane that it samples, and paints the pixel
//! with the color of `f(z)`.  An iterated plot does the same with
//! `f` applied a fixed number of times, which is how the basins of
//! Newton's method show up after a handful of steps.  No escape or
//! convergence test is made; whatever the last step returns, NaN and
//! infinity included, is handed to the color rule.

extern crate crossbeam;

use num::Complex;
use num_cpus;
use std::path::Path;
use std::sync::Mutex;

use colors::ColorRule;
use error::PlotError;
use planes::{Pixel, PlaneMapper};
use raster::Raster;

/// Renders plots of one plane with a fixed number of worker
/// threads.  Once built, it is not changed by rendering, so one
/// plotter can draw any number of images.
#[derive(Copy, Clone, Debug)]
pub struct Plotter {
    plane: PlaneMapper,
    threads: usize,
}

impl Plotter {
    /// A plotter for `plane` using one thread per CPU.
    pub fn new(plane: PlaneMapper) -> Plotter {
        Plotter {
            plane,
            threads: num_cpus::get().max(1),
        }
    }

    /// Use `threads` workers instead; anything below 1 means 1.  The
    /// thread count never changes the picture.
    pub fn with_threads(self, threads: usize) -> Plotter {
        Plotter {
            threads: threads.max(1),
            ..self
        }
    }

    /// The plane being plotted.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Paint `rule(f(z))` for every pixel into a fresh raster without
    /// writing it anywhere.
    pub fn render<F, C>(&self, f: F, rule: C) -> Result<Raster, PlotError>
    where
        F: Fn(Complex<f64>) -> Complex<f64> + Sync,
        C: ColorRule,
    {
        let mut raster = Raster::new(self.plane.width(), self.plane.height());
        if self.threads == 1 {
            self.render_single(&f, &rule, &mut raster);
        } else {
            self.render_threaded(&f, &rule, &mut raster)?;
        }
        Ok(raster)
    }

    /// The single-threaded fill: every pixel in row-major order.
    fn render_single<F, C>(&self, f: &F, rule: &C, raster: &mut Raster)
    where
        F: Fn(Complex<f64>) -> Complex<f64> + Sync,
        C: ColorRule,
    {
        for pixel in self.plane.pixels() {
            let z = self.plane.pixel_to_point(&pixel);
            raster.set(&pixel, rule.color(f(z)));
        }
    }

    /// The threaded fill.  The rows of the raster sit behind a lock
    /// and each worker takes the next unpainted row until none are
    /// left, so every row has exactly one writer.
    fn render_threaded<F, C>(&self, f: &F, rule: &C, raster: &mut Raster) -> Result<(), PlotError>
    where
        F: Fn(Complex<f64>) -> Complex<f64> + Sync,
        C: ColorRule,
    {
        let plane = &self.plane;
        let rows = Mutex::new(raster.rows_mut().enumerate());
        let rows = &rows;

        crossbeam::scope(|spawner| {
            for worker in 0..self.threads {
                spawner.spawn(move |_| {
                    let mut painted = 0;
                    loop {
                        let next = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => None,
                        };
                        match next {
                            Some((row, pixels)) => {
                                for (column, pixel) in pixels.iter_mut().enumerate() {
                                    let z = plane.pixel_to_point(&Pixel(column, row));
                                    *pixel = rule.color(f(z));
                                }
                                painted += 1;
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    debug!("worker {} painted {} rows", worker, painted);
                });
            }
        })
        .map_err(|_| PlotError::WorkerPanicked)
    }

    /// Plot `f` once over the plane and write the picture to `path`.
    pub fn complex_plot<F, C, P>(&self, f: F, rule: C, path: P) -> Result<(), PlotError>
    where
        F: Fn(Complex<f64>) -> Complex<f64> + Sync,
        C: ColorRule,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        info!(
            "plotting {}x{} pixels to {:?} on {} threads",
            self.plane.width(),
            self.plane.height(),
            path,
            self.threads
        );
        let raster = self.render(f, rule)?;
        raster.write(path)?;
        info!("wrote {:?}", path);
        Ok(())
    }

    /// Plot `f` applied `iterations` times over the plane and write
    /// the picture to `path`.  With no iterations this is a plot of
    /// the identity.
    pub fn iters_plot<F, C, P>(
        &self,
        f: F,
        iterations: usize,
        rule: C,
        path: P,
    ) -> Result<(), PlotError>
    where
        F: Fn(Complex<f64>) -> Complex<f64> + Sync,
        C: ColorRule,
        P: AsRef<Path>,
    {
        info!("iterating {} times", iterations);
        self.complex_plot(iterate(f, iterations), rule, path)
    }
}

impl Default for Plotter {
    fn default() -> Plotter {
        Plotter::new(PlaneMapper::default())
    }
}

/// `f` composed with itself `iterations` times.  Zero iterations is
/// the identity.
pub fn iterate<F>(f: F, iterations: usize) -> impl Fn(Complex<f64>) -> Complex<f64> + Sync
where
    F: Fn(Complex<f64>) -> Complex<f64> + Sync,
{
    move |z| (0..iterations).fold(z, |z, _| f(z))
}

/// Plot `f` over the default plane into `path`.
pub fn complex_plot<F, C, P>(f: F, rule: C, path: P) -> Result<(), PlotError>
where
    F: Fn(Complex<f64>) -> Complex<f64> + Sync,
    C: ColorRule,
    P: AsRef<Path>,
{
    Plotter::default().complex_plot(f, rule, path)
}

/// Plot `f` iterated `iterations` times over the default plane into
/// `path`.
pub fn iters_plot<F, C, P>(f: F, iterations: usize, rule: C, path: P) -> Result<(), PlotError>
where
    F: Fn(Complex<f64>) -> Complex<f64> + Sync,
    C: ColorRule,
    P: AsRef<Path>,
{
    Plotter::default().iters_plot(f, iterations, rule, path)
}
