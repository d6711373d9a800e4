// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The in-memory image a plot is painted into, and the only part of
//! the crate that touches the filesystem.
//!
//! Rasters are written as binary PPM: the magic number `P6`, the
//! width, the height and a maximum channel value of 255 as ASCII
//! text, then width x height RGB triples, top row first, with no
//! padding and nothing after them.

use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::{ColorType, ImageFormat};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::slice::ChunksMut;
use tempfile::NamedTempFile;

use colors::Color;
use error::PlotError;
use planes::Pixel;

/// A width x height grid of colors, stored row-major.  Starts out
/// black.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Raster {
    /// A black raster of the given size.
    pub fn new(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, pixel: &Pixel) -> usize {
        assert!(
            pixel.0 < self.width && pixel.1 < self.height,
            "pixel {:?} is outside a {}x{} raster",
            pixel,
            self.width,
            self.height
        );
        pixel.1 * self.width + pixel.0
    }

    /// Paint one pixel.  Panics if the pixel is off the raster.
    pub fn set(&mut self, pixel: &Pixel, color: Color) {
        let offset = self.offset(pixel);
        self.pixels[offset] = color;
    }

    /// Read one pixel back.  Panics if the pixel is off the raster.
    pub fn get(&self, pixel: &Pixel) -> Color {
        self.pixels[self.offset(pixel)]
    }

    /// The rows of the raster, top first, as non-overlapping mutable
    /// slices.  Each can be handed to a different thread.
    pub fn rows_mut(&mut self) -> ChunksMut<Color> {
        self.pixels.chunks_mut(self.width.max(1))
    }

    /// The pixel data exactly as it goes into the file body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.channels());
        }
        bytes
    }

    /// Encode the raster as a binary PPM at `path`.
    ///
    /// The image is written to a temporary file next to `path` and
    /// renamed into place once it is complete, so `path` either holds
    /// the whole image or is left as it was.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staging = NamedTempFile::new_in(directory)?;
        {
            let mut output = BufWriter::new(staging.as_file_mut());
            {
                let mut encoder = PNMEncoder::new(&mut output)
                    .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
                encoder.encode(
                    &self.to_bytes()[..],
                    self.width as u32,
                    self.height as u32,
                    ColorType::RGB(8),
                )?;
            }
            output.flush()?;
        }
        staging.as_file().sync_all()?;

        debug!("moving {:?} into place at {:?}", staging.path(), path);
        staging.persist(path).map_err(|e| PlotError::Io(e.error))?;
        Ok(())
    }

    /// Read a PPM file back into a raster.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Raster, PlotError> {
        let input = BufReader::new(File::open(path)?);
        let image = ::image::load(input, ImageFormat::PNM)?.to_rgb();
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = image
            .into_raw()
            .chunks(3)
            .map(|rgb| Color::new(rgb[0], rgb[1], rgb[2]))
            .collect();
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // Splits a P6 file into its four header fields and its body.
    fn parse_ppm(bytes: &[u8]) -> (String, usize, usize, usize, &[u8]) {
        let mut fields = Vec::new();
        let mut cursor = 0;
        while fields.len() < 4 {
            while bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            let start = cursor;
            while !bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            fields.push(String::from_utf8(bytes[start..cursor].to_vec()).unwrap());
        }
        // Exactly one whitespace byte separates the header from the body.
        cursor += 1;
        (
            fields[0].clone(),
            fields[1].parse().unwrap(),
            fields[2].parse().unwrap(),
            fields[3].parse().unwrap(),
            &bytes[cursor..],
        )
    }

    fn checkerboard(width: usize, height: usize) -> Raster {
        let mut raster = Raster::new(width, height);
        for row in 0..height {
            for column in 0..width {
                if (row + column) % 2 == 0 {
                    raster.set(&Pixel(column, row), Color::new(column as u8, row as u8, 7));
                }
            }
        }
        raster
    }

    #[test]
    fn new_raster_is_black() {
        let raster = Raster::new(3, 2);
        assert_eq!(raster.to_bytes(), vec![0; 18]);
    }

    #[test]
    fn set_then_get() {
        let mut raster = Raster::new(3, 2);
        raster.set(&Pixel(2, 1), Color::RED);
        assert_eq!(raster.get(&Pixel(2, 1)), Color::RED);
        assert_eq!(raster.get(&Pixel(1, 1)), Color::BLACK);
        assert_eq!(&raster.to_bytes()[15..], &[0xFF, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn set_off_the_raster_panics() {
        let mut raster = Raster::new(3, 2);
        raster.set(&Pixel(3, 0), Color::RED);
    }

    #[test]
    fn rows_are_disjoint_and_in_order() {
        let mut raster = Raster::new(2, 3);
        for (row, pixels) in raster.rows_mut().enumerate() {
            assert_eq!(pixels.len(), 2);
            for pixel in pixels.iter_mut() {
                *pixel = Color::new(row as u8, 0, 0);
            }
        }
        assert_eq!(raster.get(&Pixel(1, 2)), Color::new(2, 0, 0));
        assert_eq!(raster.get(&Pixel(0, 0)), Color::BLACK);
    }

    #[test]
    fn header_and_body_match_the_raster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.ppm");
        let raster = checkerboard(5, 3);
        raster.write(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let (magic, width, height, maxval, body) = parse_ppm(&bytes);
        assert_eq!(magic, "P6");
        assert_eq!((width, height, maxval), (5, 3, 255));
        assert_eq!(body.len(), 5 * 3 * 3);
        assert_eq!(body, &raster.to_bytes()[..]);
    }

    #[test]
    fn written_raster_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.ppm");
        let raster = checkerboard(4, 6);
        raster.write(&path).unwrap();
        assert_eq!(Raster::open(&path).unwrap(), raster);
    }

    #[test]
    fn write_replaces_an_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.ppm");
        fs::write(&path, b"stale").unwrap();
        Raster::new(2, 2).write(&path).unwrap();
        assert_eq!(Raster::open(&path).unwrap(), Raster::new(2, 2));
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-directory").join("board.ppm");
        match Raster::new(2, 2).write(&path) {
            Err(PlotError::Io(_)) => (),
            other => panic!("expected an I/O error, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn no_staging_files_are_left_behind() {
        let dir = tempdir().unwrap();
        checkerboard(3, 3).write(dir.path().join("board.ppm")).unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![::std::ffi::OsString::from("board.ppm")]);
    }
}
