// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! in the top-left corner, and a rectangle on the complex plane
//! bounded by a leftlower and a rightupper corner.
use itertools::{iproduct, Product};
use num::Complex;
use std::ops::Range;

use error::PlotError;

/// Describes the width and height of an integral plane that is
/// assumed to start at 0,0.  Both are strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// The column, row of a point on the integral plane.  Row 0 is the
/// top of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Row-major walk over every pixel of a plane.
pub struct Pixels(Product<Range<usize>, Range<usize>>);

impl Iterator for Pixels {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        self.0.next().map(|(row, column)| Pixel(column, row))
    }
}

/// An immutable grid configuration: the integral plane of the image,
/// the window of the complex plane it looks at, and the affine map
/// between the two.
///
/// Column 0 samples the real minimum and the last column the real
/// maximum.  Row 0 samples the imaginary *maximum*, so the picture
/// comes out the right way up, and the last row samples the
/// imaginary minimum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// Width and height of the image.
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex window, left-lower
    /// and right-upper.
    pub complex_plane: ComplexPlane,
    // The last column and row index, as the denominators of the
    // interpolation.
    spans: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the image and the two corners
    /// of the complex window.  Rejects empty images, non-finite
    /// corners, and windows that are inverted or have no width or
    /// height.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, PlotError> {
        if width == 0 || height == 0 {
            return Err(PlotError::EmptyPlane { width, height });
        }

        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(PlotError::NonFinitePlane);
        }

        if rightupper.re <= leftlower.re {
            return Err(PlotError::InvertedPlane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(PlotError::InvertedPlane(
                "The left lower corner is not lower than the right upper corner.".to_string(),
            ));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            spans: ((width - 1) as f64, (height - 1) as f64),
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Always false for a validated plane; here for the sake of
    /// `len()`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane it samples.  Pixels outside the image are not
    /// clamped; the same affine map simply carries on past the
    /// window's edge.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let ComplexPlane(leftlower, rightupper) = self.complex_plane;
        Complex::new(
            lerp(leftlower.re, rightupper.re, fraction(pixel.0, self.spans.0)),
            lerp(rightupper.im, leftlower.im, fraction(pixel.1, self.spans.1)),
        )
    }

    /// Every pixel of the image, row 0 first, left to right.
    pub fn pixels(&self) -> Pixels {
        Pixels(iproduct!(0..self.height(), 0..self.width()))
    }
}

impl Default for PlaneMapper {
    /// A 1024x1024 image of the square [-2, 2] x [-2i, 2i].
    fn default() -> PlaneMapper {
        PlaneMapper {
            integral_plane: IntegralPlane(1024, 1024),
            complex_plane: ComplexPlane(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)),
            spans: (1023.0, 1023.0),
        }
    }
}

// Where index sits between the first (0.0) and last (1.0) sample.  A
// plane one sample wide puts that sample on the starting edge.
fn fraction(index: usize, span: f64) -> f64 {
    if span > 0.0 {
        (index as f64) / span
    } else {
        0.0
    }
}

// Written as a weighted sum so that t = 0 and t = 1 land exactly on
// the window's edges.
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize) -> PlaneMapper {
        PlaneMapper::new(size, size, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap()
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_degenerate_window() {
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), Complex::new(1.0, 1.0));
        match pm {
            Err(PlotError::InvertedPlane(_)) => (),
            other => panic!("expected an inverted plane, got {:?}", other),
        }
    }

    #[test]
    fn planemapper_fails_on_empty_image() {
        match PlaneMapper::new(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)) {
            Err(PlotError::EmptyPlane { width: 0, height: 4 }) => (),
            other => panic!("expected an empty plane, got {:?}", other),
        }
        assert!(PlaneMapper::new(4, 0, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn planemapper_fails_on_non_finite_corner() {
        let pm = PlaneMapper::new(4, 4, Complex::new(::std::f64::NAN, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(
            4,
            4,
            Complex::new(-1.0, -1.0),
            Complex::new(::std::f64::INFINITY, 1.0),
        );
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn corners_map_to_window_corners() {
        let pm = PlaneMapper::new(640, 480, Complex::new(-2.5, -1.0), Complex::new(1.5, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.5, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(639, 479)), Complex::new(1.5, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(639, 0)), Complex::new(1.5, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 479)), Complex::new(-2.5, -1.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = square(5);
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, 1.0));
    }

    #[test]
    fn sampling_is_affine() {
        let pm = PlaneMapper::new(7, 3, Complex::new(-1.0, -3.0), Complex::new(2.0, 3.0)).unwrap();
        let origin = pm.pixel_to_point(&Pixel(0, 0));
        let right = pm.pixel_to_point(&Pixel(1, 0)) - origin;
        let down = pm.pixel_to_point(&Pixel(0, 1)) - origin;
        for pixel in pm.pixels() {
            let expected = origin + right * (pixel.0 as f64) + down * (pixel.1 as f64);
            let actual = pm.pixel_to_point(&pixel);
            assert!((expected - actual).norm() < 1e-12, "{:?}", pixel);
        }
    }

    #[test]
    fn out_of_range_pixels_extrapolate() {
        let pm = square(5);
        assert_eq!(pm.pixel_to_point(&Pixel(5, 5)), Complex::new(3.0, -3.0));
    }

    #[test]
    fn single_pixel_plane_samples_left_upper_corner() {
        let pm = PlaneMapper::new(1, 1, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-1.0, 1.0));
    }

    #[test]
    fn pixels_walk_row_major() {
        let pm = PlaneMapper::new(3, 2, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        let walked: Vec<Pixel> = pm.pixels().collect();
        assert_eq!(
            walked,
            vec![Pixel(0, 0), Pixel(1, 0), Pixel(2, 0), Pixel(0, 1), Pixel(1, 1), Pixel(2, 1)]
        );
        assert_eq!(pm.len(), 6);
    }

    #[test]
    fn default_plane_matches_explicit_one() {
        let explicit =
            PlaneMapper::new(1024, 1024, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(PlaneMapper::default(), explicit);
    }
}
