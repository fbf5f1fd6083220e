use std::ops::RangeInclusive;

use crate::error::DiscosError;

/// First year with an orbital launch.
pub const MIN_YEAR: i32 = 1957;
pub const MAX_YEAR: i32 = 2100;

/// Validate an inclusive year range: ordered, and both ends within
/// [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn validate_year_range(start: i32, end: i32) -> Result<RangeInclusive<i32>, DiscosError> {
    for year in [start, end] {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DiscosError::InvalidInput(format!(
                "year {} is outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
    }
    if start > end {
        return Err(DiscosError::InvalidInput(format!(
            "start year {} is after end year {}",
            start, end
        )));
    }
    Ok(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_year() {
        assert_eq!(validate_year_range(2022, 2022).unwrap(), 2022..=2022);
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            validate_year_range(2023, 2022),
            Err(DiscosError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_years() {
        assert!(validate_year_range(1900, 2000).is_err());
        assert!(validate_year_range(2000, 3000).is_err());
        assert!(validate_year_range(MIN_YEAR, MAX_YEAR).is_ok());
    }
}
