// THEORY:
// The `color` module is the most fundamental unit of the engine. It is a set of
// "dumb" value types for pixel colors plus the pure numeric functions that relate
// them: RGB <-> HSL conversion, a Euclidean distance metric, and a palette
// quantization filter factory. Nothing here holds state and nothing here knows
// about frames; it is the vocabulary the rest of the engine speaks.
//
// Key architectural principles:
// 1.  **Distinct Vector Types**: 3-channel (`Rgb`, `Hsl`) and 4-channel (`Rgba`,
//     `Hsla`) values are separate structs, so the compiler rejects handing a
//     color-only value to an API that needs an alpha channel. Conversions
//     between the shapes are explicit (`rgb()`, `with_alpha()`).
// 2.  **Alpha Pass-Through**: Alpha is never part of a color space conversion.
//     `Rgba::to_hsla` and `Hsla::to_rgba` carry the alpha byte across unchanged.
// 3.  **Integer Surface, Float Core**: The public types are integer-channel
//     (bytes, degrees, percents) to match raw frame data; the conversion math
//     runs in f64 and rounds once at the boundary.

pub mod color {
    /// A single 8-bit color or alpha channel (0-255).
    pub type Channel = u8;
    /// A hue angle in whole degrees, always reduced into [0, 360).
    pub type Degrees = u16;
    /// A saturation or lightness percentage (0-100).
    pub type Percent = u8;
    /// A Euclidean distance in RGB space (0.0 to ~441.67).
    pub type Distance = f64;

    /// An opaque RGB color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rgb {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    /// An RGB color with an alpha channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rgba {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
        pub alpha: Channel,
    }

    /// A color in HSL space.
    /// - `hue`: position on the color wheel. 0 is red, 120 green, 240 blue.
    /// - `saturation`: 0 is grayscale, 100 is full color.
    /// - `lightness`: 0 is black, 100 is white, 50 is average lightness.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Hsl {
        pub hue: Degrees,
        pub saturation: Percent,
        pub lightness: Percent,
    }

    /// An HSL color with an alpha channel (0-255, same scale as `Rgba`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Hsla {
        pub hue: Degrees,
        pub saturation: Percent,
        pub lightness: Percent,
        pub alpha: Channel,
    }

    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);
    pub const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
    pub const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
    pub const GRAY: Rgba = Rgba::new(128, 128, 128, 255);
    pub const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);
    pub const MAGENTA: Rgba = Rgba::new(255, 0, 255, 255);
    pub const CYAN: Rgba = Rgba::new(0, 255, 255, 255);

    impl Rgb {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        /// Attach an alpha channel.
        pub const fn with_alpha(self, alpha: Channel) -> Rgba {
            Rgba::new(self.red, self.green, self.blue, alpha)
        }

        /// Convert to HSL using the standard max/min-channel derivation.
        ///
        /// The achromatic case (all channels equal) yields hue 0, saturation 0.
        /// Hue is rounded to the nearest degree and reduced into [0, 360);
        /// saturation and lightness are rounded percentages.
        pub fn to_hsl(self) -> Hsl {
            let r = self.red as f64 / 255.0;
            let g = self.green as f64 / 255.0;
            let b = self.blue as f64 / 255.0;

            let max = r.max(g.max(b));
            let min = r.min(g.min(b));

            let mut h = 0.0;
            let mut s = 0.0;
            let l = (max + min) / 2.0;

            if max != min {
                let d = max - min;
                s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
                h = if max == r {
                    (g - b) / d + if g < b { 6.0 } else { 0.0 }
                } else if max == g {
                    (b - r) / d + 2.0
                } else {
                    (r - g) / d + 4.0
                };
                h /= 6.0;
            }

            Hsl {
                // Rounding can land exactly on 360 at the wrap point; fold it back.
                hue: ((h * 360.0).round() as Degrees) % 360,
                saturation: (s * 100.0).round() as Percent,
                lightness: (l * 100.0).round() as Percent,
            }
        }
    }

    impl Rgba {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Self {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// The color channels, alpha dropped.
        pub const fn rgb(self) -> Rgb {
            Rgb::new(self.red, self.green, self.blue)
        }

        /// Convert the color channels to HSL; alpha is ignored.
        pub fn to_hsl(self) -> Hsl {
            self.rgb().to_hsl()
        }

        /// Convert the color channels to HSL and carry the alpha byte across.
        pub fn to_hsla(self) -> Hsla {
            self.rgb().to_hsl().with_alpha(self.alpha)
        }
    }

    impl Hsl {
        pub const fn new(hue: Degrees, saturation: Percent, lightness: Percent) -> Self {
            Self {
                hue,
                saturation,
                lightness,
            }
        }

        /// Attach an alpha channel.
        pub const fn with_alpha(self, alpha: Channel) -> Hsla {
            Hsla {
                hue: self.hue,
                saturation: self.saturation,
                lightness: self.lightness,
                alpha,
            }
        }

        /// Convert to RGB using the standard `k/a/f` formulation.
        ///
        /// Channels are rounded to the nearest integer; for valid HSL input the
        /// formula keeps every channel inside [0, 255] without an explicit clamp.
        pub fn to_rgb(self) -> Rgb {
            let hue = self.hue as f64;
            let sat = self.saturation as f64 / 100.0;
            let light = self.lightness as f64 / 100.0;

            let k = |n: f64| (n + hue / 30.0) % 12.0;
            let a = sat * light.min(1.0 - light);
            let f = |n: f64| light - a * (-1.0f64).max((k(n) - 3.0).min((9.0 - k(n)).min(1.0)));

            Rgb::new(
                (255.0 * f(0.0)).round() as Channel,
                (255.0 * f(8.0)).round() as Channel,
                (255.0 * f(4.0)).round() as Channel,
            )
        }
    }

    impl Hsla {
        pub const fn new(
            hue: Degrees,
            saturation: Percent,
            lightness: Percent,
            alpha: Channel,
        ) -> Self {
            Self {
                hue,
                saturation,
                lightness,
                alpha,
            }
        }

        /// The color components, alpha dropped.
        pub const fn hsl(self) -> Hsl {
            Hsl::new(self.hue, self.saturation, self.lightness)
        }

        /// Convert the color components to RGB; alpha is ignored.
        pub fn to_rgb(self) -> Rgb {
            self.hsl().to_rgb()
        }

        /// Convert the color components to RGB and carry the alpha byte across.
        pub fn to_rgba(self) -> Rgba {
            self.hsl().to_rgb().with_alpha(self.alpha)
        }
    }

    /// Euclidean distance between two RGB colors.
    ///
    /// Symmetric, and zero exactly when the colors are equal. The maximum
    /// (black to white) is sqrt(3 * 255^2), about 441.67.
    pub fn color_distance(a: Rgb, b: Rgb) -> Distance {
        let dr = a.red as f64 - b.red as f64;
        let dg = a.green as f64 - b.green as f64;
        let db = a.blue as f64 - b.blue as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Options for palette quantization.
    #[derive(Debug, Clone)]
    pub struct QuantizeOptions {
        /// Candidate colors, tried in order; the first entry at the minimum
        /// distance wins ties.
        pub palette: Vec<Rgb>,
        /// Maximum distance at which a palette color may replace a pixel.
        /// `None` means every pixel snaps to its nearest palette color.
        pub threshold: Option<Distance>,
    }

    /// Build a pixel filter that maps each pixel to the closest palette color,
    /// preserving the pixel's original alpha. With a threshold set, pixels
    /// farther than the threshold from every palette color pass through
    /// unchanged. An empty palette passes every pixel through.
    ///
    /// The returned closure has the shape `Frame::apply_filter` expects.
    pub fn quantize_filter(options: QuantizeOptions) -> impl Fn(u32, u32, Rgba) -> Rgba {
        let QuantizeOptions { palette, threshold } = options;
        move |_x, _y, rgba| {
            let Some(&first) = palette.first() else {
                return rgba;
            };
            let mut closest = first;
            let mut min_dist = Distance::INFINITY;
            for &candidate in &palette {
                let dist = color_distance(rgba.rgb(), candidate);
                if dist < min_dist {
                    min_dist = dist;
                    closest = candidate;
                }
            }
            if let Some(limit) = threshold {
                if min_dist > limit {
                    return rgba;
                }
            }
            closest.with_alpha(rgba.alpha)
        }
    }
}
