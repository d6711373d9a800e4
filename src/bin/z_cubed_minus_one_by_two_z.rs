// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plots ten rounds of g(z) = (z^3 - 1) / 3z^2, folded into a single
//! function and drawn as an ordinary complex plot.

extern crate complex_plots;
extern crate env_logger;
extern crate num;

use complex_plots::colors::color_wheel_from_complex;
use num::Complex;

const OUTPUT: &str = "z_cubed_minus_one_by_two_z.ppm";
const ROUNDS: usize = 10;

fn g(z: Complex<f64>) -> Complex<f64> {
    (z * z * z - 1.0) / (z * z * 3.0)
}

fn main() {
    env_logger::init();

    let f = complex_plots::iterate(g, ROUNDS);
    if let Err(e) = complex_plots::complex_plot(f, color_wheel_from_complex, OUTPUT) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
