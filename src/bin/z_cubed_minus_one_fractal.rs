// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plots the first three steps of Newton's method for z^3 - 1.

extern crate complex_plots;
extern crate env_logger;
extern crate num;

use complex_plots::colors::color_wheel_from_complex;
use num::Complex;

const OUTPUT: &str = "z_cubed_minus_one_three_iters.ppm";
const ITERATIONS: usize = 3;

/// z - f(z)/f'(z) for f(z) = z^3 - 1, which is (2z^3 + 1) / 3z^2.
fn newton(z: Complex<f64>) -> Complex<f64> {
    (z * z * z * 2.0 + 1.0) / (z * z * 3.0)
}

fn main() {
    env_logger::init();

    if let Err(e) = complex_plots::iters_plot(newton, ITERATIONS, color_wheel_from_complex, OUTPUT)
    {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
