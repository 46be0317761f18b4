//! Id synthesis
//!
//! Ids are built from a list of [`IdPart`]s. Each part is rendered according to
//! its kind and the pieces are joined with the format's separator:
//!
//! - unsigned integers are zero padded to `digits`
//! - signed integers carry a sign and are zero padded to `digits`
//! - floats carry a sign, an integer part zero padded to `digits` and
//!   `decimals` fractional digits
//! - text and characters are copied verbatim
//!
//! ```rust
//! use idstore::IdFormat;
//!
//! let format = IdFormat::default();
//! assert_eq!(format.make_id(42u32), "00000042");
//! assert_eq!(format.make_id(("Asia", "Tokyo")), "Asia~#~Tokyo");
//! assert_eq!(format.make_id(-7i32), "-00000007");
//! ```

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// Separator placed between formatted parts unless configured otherwise
pub const DEFAULT_ID_SEPARATOR: &str = "~#~";
/// Default zero-padded width of integer parts
pub const DEFAULT_ID_DIGITS: usize = 8;
/// Default number of fractional digits of float parts
pub const DEFAULT_ID_DECIMALS: usize = 4;
/// First value handed out by the auto-increment counter
pub const DEFAULT_ID_COUNTER_START: u64 = 10_000;

/// One argument of a synthesized id
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdPart<'a> {
    /// Unsigned integer, zero padded
    Unsigned(u64),
    /// Signed integer, sign prefixed and zero padded
    Signed(i64),
    /// Floating point, sign prefixed with fixed decimals
    Float(f64),
    /// Text, copied verbatim
    Text(&'a str),
    /// Single character, copied verbatim
    Char(char),
}

macro_rules! impl_id_part_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl<'a> From<$t> for IdPart<'a> {
                #[inline]
                fn from(value: $t) -> Self {
                    IdPart::$variant(value as $target)
                }
            }
        )*
    };
}

impl_id_part_from!(Unsigned as u64: u8, u16, u32, u64, usize);
impl_id_part_from!(Signed as i64: i8, i16, i32, i64, isize);
impl_id_part_from!(Float as f64: f32, f64);

impl<'a> From<char> for IdPart<'a> {
    #[inline]
    fn from(value: char) -> Self {
        IdPart::Char(value)
    }
}

impl<'a> From<&'a str> for IdPart<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        IdPart::Text(value)
    }
}

impl<'a> From<&'a String> for IdPart<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        IdPart::Text(value.as_str())
    }
}

/// Conversion of one value or a tuple of values into id parts
///
/// Implemented for every type with an `Into<IdPart>` conversion, for tuples of
/// up to six such types and for slices and vectors of [`IdPart`].
pub trait IntoIdParts<'a> {
    /// Collect the parts in argument order
    fn into_id_parts(self) -> Vec<IdPart<'a>>;
}

macro_rules! impl_into_id_parts_single {
    ($($t:ty),*) => {
        $(
            impl<'a> IntoIdParts<'a> for $t {
                #[inline]
                fn into_id_parts(self) -> Vec<IdPart<'a>> {
                    vec![IdPart::from(self)]
                }
            }
        )*
    };
}

impl_into_id_parts_single!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, char);

impl<'a> IntoIdParts<'a> for &'a str {
    fn into_id_parts(self) -> Vec<IdPart<'a>> {
        vec![IdPart::Text(self)]
    }
}

impl<'a> IntoIdParts<'a> for &'a String {
    fn into_id_parts(self) -> Vec<IdPart<'a>> {
        vec![IdPart::Text(self.as_str())]
    }
}

impl<'a> IntoIdParts<'a> for IdPart<'a> {
    fn into_id_parts(self) -> Vec<IdPart<'a>> {
        vec![self]
    }
}

impl<'a> IntoIdParts<'a> for Vec<IdPart<'a>> {
    fn into_id_parts(self) -> Vec<IdPart<'a>> {
        self
    }
}

impl<'a, 'b> IntoIdParts<'a> for &'b [IdPart<'a>] {
    fn into_id_parts(self) -> Vec<IdPart<'a>> {
        self.to_vec()
    }
}

macro_rules! impl_into_id_parts_tuple {
    ($($name:ident),+) => {
        impl<'a, $($name),+> IntoIdParts<'a> for ($($name,)+)
        where
            $($name: Into<IdPart<'a>>),+
        {
            #[allow(non_snake_case)]
            fn into_id_parts(self) -> Vec<IdPart<'a>> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_id_parts_tuple!(A);
impl_into_id_parts_tuple!(A, B);
impl_into_id_parts_tuple!(A, B, C);
impl_into_id_parts_tuple!(A, B, C, D);
impl_into_id_parts_tuple!(A, B, C, D, E);
impl_into_id_parts_tuple!(A, B, C, D, E, F);

/// Formatting rules for synthesized ids
///
/// Cloning is cheap enough to hand a copy to an id callback, which is how a
/// callback builds ids with the same separator and widths as its store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdFormat {
    separator: String,
    digits: usize,
    decimals: usize,
}

impl Default for IdFormat {
    fn default() -> Self {
        Self {
            separator: DEFAULT_ID_SEPARATOR.to_string(),
            digits: DEFAULT_ID_DIGITS,
            decimals: DEFAULT_ID_DECIMALS,
        }
    }
}

impl IdFormat {
    /// Create a format, rejecting an empty separator or zero widths
    pub fn new<S: Into<String>>(separator: S, digits: usize, decimals: usize) -> Result<Self> {
        let mut format = Self::default();
        format.set_separator(separator)?;
        format.set_digits(digits)?;
        format.set_decimals(decimals)?;
        Ok(format)
    }

    /// Separator placed between parts
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Zero-padded width of integer parts
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Fractional digits of float parts
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Change the separator; an empty separator is rejected
    pub fn set_separator<S: Into<String>>(&mut self, separator: S) -> Result<()> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(StoreError::configuration("id separator must not be empty"));
        }
        self.separator = separator;
        Ok(())
    }

    /// Change the integer width; zero is rejected
    pub fn set_digits(&mut self, digits: usize) -> Result<()> {
        if digits == 0 {
            return Err(StoreError::configuration("id digits must be at least 1"));
        }
        self.digits = digits;
        Ok(())
    }

    /// Change the number of fractional digits; zero is rejected
    pub fn set_decimals(&mut self, decimals: usize) -> Result<()> {
        if decimals == 0 {
            return Err(StoreError::configuration("id decimals must be at least 1"));
        }
        self.decimals = decimals;
        Ok(())
    }

    /// Render a single part
    pub fn format_part(&self, part: &IdPart<'_>) -> String {
        match *part {
            IdPart::Unsigned(n) => format!("{:0width$}", n, width = self.digits),
            // the sign occupies one position of the padded width
            IdPart::Signed(n) => format!("{:+0width$}", n, width = self.digits + 1),
            IdPart::Float(f) => format!(
                "{:+0width$.prec$}",
                f,
                width = self.digits + self.decimals + 2,
                prec = self.decimals
            ),
            IdPart::Text(s) => s.to_string(),
            IdPart::Char(c) => c.to_string(),
        }
    }

    /// Build an id from one value or a tuple of values
    pub fn make_id<'a, P: IntoIdParts<'a>>(&self, parts: P) -> String {
        let parts = parts.into_id_parts();
        let mut id = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                id.push_str(&self.separator);
            }
            id.push_str(&self.format_part(part));
        }
        id
    }
}

/// Format plus the auto-increment counter used when no id is supplied
#[derive(Debug, Clone)]
pub(crate) struct IdGenerator {
    pub(crate) format: IdFormat,
    counter: u64,
}

impl IdGenerator {
    pub(crate) fn new(format: IdFormat, counter_start: u64) -> Self {
        Self {
            format,
            counter: counter_start,
        }
    }

    /// Next counter value, formatted as an unsigned part
    pub(crate) fn next_id(&mut self) -> String {
        let id = self.format.make_id(self.counter);
        self.counter = self.counter.wrapping_add(1);
        id
    }

    pub(crate) fn counter(&self) -> u64 {
        self.counter
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdFormat::default(), DEFAULT_ID_COUNTER_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_padding() {
        let format = IdFormat::default();
        assert_eq!(format.make_id(10_000u64), "00010000");
        assert_eq!(format.make_id(7u8), "00000007");
        // wider numbers are never truncated
        assert_eq!(format.make_id(123_456_789_012u64), "123456789012");
    }

    #[test]
    fn test_signed_and_float() {
        let format = IdFormat::default();
        assert_eq!(format.make_id(42i32), "+00000042");
        assert_eq!(format.make_id(-42i64), "-00000042");
        assert_eq!(format.make_id(3.5f64), "+00000003.5000");
        assert_eq!(format.make_id(-0.25f32), "-00000000.2500");
    }

    #[test]
    fn test_text_and_char() {
        let format = IdFormat::default();
        let owned = String::from("Kyiv");
        assert_eq!(format.make_id("Europe"), "Europe");
        assert_eq!(format.make_id(&owned), "Kyiv");
        assert_eq!(format.make_id('x'), "x");
    }

    #[test]
    fn test_tuples_join_with_separator() {
        let format = IdFormat::default();
        assert_eq!(format.make_id(("Asia", "Tokyo")), "Asia~#~Tokyo");
        assert_eq!(
            format.make_id((2_952_301u32, "IEV", 'k')),
            "02952301~#~IEV~#~k"
        );

        let parts = [IdPart::Text("a"), IdPart::Unsigned(1)];
        assert_eq!(format.make_id(&parts[..]), "a~#~00000001");
    }

    #[test]
    fn test_custom_format() {
        let format = IdFormat::new("$$$", 3, 1).unwrap();
        assert_eq!(format.make_id(("Europe", 5u32)), "Europe$$$005");
        assert_eq!(format.make_id(1.3f64), "+001.3");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut format = IdFormat::default();
        assert!(format.set_separator("").is_err());
        assert!(format.set_digits(0).is_err());
        assert!(format.set_decimals(0).is_err());
        assert_eq!(format, IdFormat::default());

        assert!(IdFormat::new("", 8, 4).is_err());
    }

    #[test]
    fn test_generator_counts_up() {
        let mut generator = IdGenerator::default();
        assert_eq!(generator.next_id(), "00010000");
        assert_eq!(generator.next_id(), "00010001");
        assert_eq!(generator.counter(), 10_002);

        generator.format.set_digits(3).unwrap();
        assert_eq!(generator.next_id(), "10002");
    }
}
