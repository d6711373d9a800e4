// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors, and the rules that turn a complex number into one.
//!
//! Every rule here reads the argument of `z` off one of two
//! gradients.  The plain gradient runs blue, cyan, green, yellow, red
//! as the angle goes from -pi to pi; the wheel continues on through
//! magenta and back to blue, so the seam on the negative real axis
//! disappears.  Most rules then darken the hue by a factor that climbs
//! from 0 at the origin towards 1 as `|z|` grows:
//!
//! ```text
//! t(z) = atan(5 |z|) / (pi / 2)
//! ```
//!
//! so zeros of a function show up as black spots and poles as bright
//! ones.  A `z` with a NaN in it is painted black.
//!
//! For reference, `color_wheel_from_complex(-1)` is `(0, 0, 222)` and
//! `color_wheel_from_complex(1)` is `(222, 222, 0)`.

use num::Complex;
use std::f64::consts::PI;

const TAU: f64 = 2.0 * PI;

// Each gradient is built from ramps this many steps long.
const RAMP: f64 = 256.0;

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Color {
    /// Pure black, and the color of anything undefined.
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    /// Pure white.
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    /// Pure red.
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    /// Pure green.
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
    /// Pure blue.
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);

    /// Constructor.
    pub const fn new(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// The three channels in R, G, B order, as they go on disk.
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Multiply every channel by `t`, truncating.  `t` is clamped to
    /// [0, 1]; NaN counts as 0.
    pub fn scale_by(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
        let scale = |c: u8| (f64::from(c) * t) as u8;
        Color::new(scale(self.red), scale(self.green), scale(self.blue))
    }

    /// Stretch the color so its brightest channel is 255.  Black stays
    /// black.
    pub fn normalized(&self) -> Color {
        let brightest = self.red.max(self.green).max(self.blue);
        if brightest == 0 {
            return *self;
        }
        let factor = 255.0 / f64::from(brightest);
        let stretch = |c: u8| (f64::from(c) * factor).min(255.0) as u8;
        Color::new(stretch(self.red), stretch(self.green), stretch(self.blue))
    }

    /// The photographic negative.
    pub fn negated(&self) -> Color {
        Color::new(0xFF - self.red, 0xFF - self.green, 0xFF - self.blue)
    }
}

/// Anything that can pick a color for a complex value.  Every
/// `Fn(Complex<f64>) -> Color` is a rule, so the functions in this
/// module and any closure can be handed straight to a plotter.
///
/// Rules run on several threads at once and must be total: they are
/// fed whatever the plotted function returns, NaN and infinity
/// included.
pub trait ColorRule: Sync {
    /// The color of `z`.
    fn color(&self, z: Complex<f64>) -> Color;
}

impl<F> ColorRule for F
where
    F: Fn(Complex<f64>) -> Color + Sync,
{
    fn color(&self, z: Complex<f64>) -> Color {
        self(z)
    }
}

// Full-brightness colors along a ramp, `step` in [0, 256).
fn rising(step: f64) -> u8 {
    step as u8
}

fn falling(step: f64) -> u8 {
    0xFF - step as u8
}

// Split a gradient position into the index of its ramp and the step
// inside that ramp.
fn segment(position: f64) -> (usize, f64) {
    let index = (position / RAMP).floor();
    (index as usize, position - index * RAMP)
}

/// Color an angle in [-pi, pi] on the four-ramp gradient blue, cyan,
/// green, yellow, red.  Angles below -pi are blue and angles of pi or
/// more are red.
pub fn color_from_angle(angle: f64) -> Color {
    let position = (angle + PI) / TAU * (4.0 * RAMP);
    if position.is_nan() {
        return Color::BLACK;
    }
    if position < 0.0 {
        return Color::BLUE;
    }
    if position >= 4.0 * RAMP {
        return Color::RED;
    }
    let (index, step) = segment(position);
    match index {
        0 => Color::new(0x00, rising(step), 0xFF),
        1 => Color::new(0x00, 0xFF, falling(step)),
        2 => Color::new(rising(step), 0xFF, 0x00),
        _ => Color::new(0xFF, falling(step), 0x00),
    }
}

/// Color an angle on the six-ramp wheel blue, cyan, green, yellow,
/// red, magenta and back to blue.  The wheel wraps, so -pi and pi are
/// both blue.
pub fn color_wheel_from_angle(angle: f64) -> Color {
    let mut position = ((angle + PI) / TAU * (6.0 * RAMP)).rem_euclid(6.0 * RAMP);
    if position.is_nan() {
        return Color::BLACK;
    }
    // rem_euclid rounds a hair below zero up to the modulus itself.
    if position >= 6.0 * RAMP {
        position = 0.0;
    }
    let (index, step) = segment(position);
    match index {
        0 => Color::new(0x00, rising(step), 0xFF),
        1 => Color::new(0x00, 0xFF, falling(step)),
        2 => Color::new(rising(step), 0xFF, 0x00),
        3 => Color::new(0xFF, falling(step), 0x00),
        4 => Color::new(0xFF, 0x00, rising(step)),
        _ => Color::new(falling(step), 0x00, 0xFF),
    }
}

/// How brightly to paint `z`: 0 at the origin, approaching 1 as `|z|`
/// heads off to infinity, and exactly 1 once it gets there.
pub fn scale_factor(z: Complex<f64>) -> f64 {
    (5.0 * z.norm()).atan() / (0.5 * PI)
}

fn is_undefined(z: Complex<f64>) -> bool {
    z.re.is_nan() || z.im.is_nan()
}

/// The argument of `z` on the plain gradient, at full brightness.
/// The argument of 0 is taken to be 0.
pub fn color_from_argument(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_from_angle(z.arg())
}

/// The argument of `z` on the wheel, at full brightness.
pub fn color_wheel_from_argument(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_wheel_from_angle(z.arg())
}

/// The argument on the plain gradient, darkened by the modulus.
pub fn color_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_from_argument(z).scale_by(scale_factor(z))
}

/// The argument on the wheel, darkened by the modulus.  This is the
/// rule the bundled plots use.
pub fn color_wheel_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_wheel_from_argument(z).scale_by(scale_factor(z))
}

/// Like `color_from_complex`, with the hue brought to full intensity
/// before it is darkened.
pub fn normalized_color_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_from_argument(z).normalized().scale_by(scale_factor(z))
}

/// Like `color_wheel_from_complex`, with the hue brought to full
/// intensity before it is darkened.
pub fn normalized_color_wheel_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_wheel_from_argument(z).normalized().scale_by(scale_factor(z))
}

// atan squeezes [0, inf] into [0, pi/2]; stretch that over the whole
// range of angles.
fn modulus_angle(z: Complex<f64>) -> f64 {
    z.norm().atan() * 4.0 - PI
}

/// Ignore the argument and color the modulus alone on the plain
/// gradient: blue at 0, red at infinity.
pub fn color_from_modulus(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_from_angle(modulus_angle(z))
}

/// Color the modulus alone on the wheel.
pub fn color_wheel_from_modulus(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_wheel_from_angle(modulus_angle(z))
}

/// The negative of the plain gradient, darkened by the modulus.
pub fn negative_color_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_from_argument(z).negated().scale_by(scale_factor(z))
}

/// The negative of the wheel, darkened by the modulus.
pub fn negative_color_wheel_from_complex(z: Complex<f64>) -> Color {
    if is_undefined(z) {
        return Color::BLACK;
    }
    color_wheel_from_argument(z).negated().scale_by(scale_factor(z))
}
