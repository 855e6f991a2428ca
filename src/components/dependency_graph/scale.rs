//! Continuous viridis color scale.

/// Evenly spaced viridis samples from 0.0 to 1.0.
pub const VIRIDIS: [Rgb; 9] = [
	Rgb::new(0x44, 0x01, 0x54),
	Rgb::new(0x47, 0x2c, 0x7a),
	Rgb::new(0x3b, 0x51, 0x8b),
	Rgb::new(0x2c, 0x71, 0x8e),
	Rgb::new(0x21, 0x90, 0x8d),
	Rgb::new(0x27, 0xad, 0x81),
	Rgb::new(0x5c, 0xc8, 0x63),
	Rgb::new(0xaa, 0xdc, 0x32),
	Rgb::new(0xfd, 0xe7, 0x25),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn css(&self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}

	pub fn css_alpha(&self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
	}

	fn lerp(self, other: Rgb, t: f64) -> Rgb {
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
	}
}

/// Sample viridis at `t`, clamped to `[0, 1]`.
pub fn viridis(t: f64) -> Rgb {
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	let pos = t * (VIRIDIS.len() - 1) as f64;
	let lo = pos.floor() as usize;
	if lo + 1 >= VIRIDIS.len() {
		return VIRIDIS[VIRIDIS.len() - 1];
	}
	VIRIDIS[lo].lerp(VIRIDIS[lo + 1], pos - lo as f64)
}

/// Maps component counts onto viridis over the observed range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale {
	pub min: usize,
	pub max: usize,
}

impl ColorScale {
	pub fn from_values(values: impl IntoIterator<Item = usize>) -> Self {
		let mut iter = values.into_iter();
		let Some(first) = iter.next() else {
			return Self { min: 0, max: 0 };
		};
		iter.fold(Self { min: first, max: first }, |s, v| Self {
			min: s.min.min(v),
			max: s.max.max(v),
		})
	}

	/// Position of `value` in the range; 0 when the range is empty.
	pub fn normalize(&self, value: usize) -> f64 {
		if self.max <= self.min {
			return 0.0;
		}
		(value.saturating_sub(self.min)) as f64 / (self.max - self.min) as f64
	}

	pub fn color(&self, value: usize) -> Rgb {
		viridis(self.normalize(value))
	}

	/// Legend tick values: every integer for small ranges, five steps otherwise.
	pub fn ticks(&self) -> Vec<usize> {
		let span = self.max.saturating_sub(self.min);
		if span <= 10 {
			return (self.min..=self.max).collect();
		}
		let mut ticks: Vec<usize> = (0..=4)
			.map(|i| self.min + (span as f64 * i as f64 / 4.0).round() as usize)
			.collect();
		ticks.dedup();
		ticks
	}
}
