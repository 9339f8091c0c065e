//! Home page featured-set caps.

use crate::error::CoreError;
use crate::relations::validate_unique_ids;
use crate::types::DbId;

/// Maximum number of films featured on the home page.
pub const MAX_FEATURED_FILMS: usize = 4;

/// Maximum number of press items featured on the home page.
pub const MAX_FEATURED_PRESS: usize = 6;

/// Validate both featured selections before anything is written.
pub fn validate_featured(film_ids: &[DbId], press_ids: &[DbId]) -> Result<(), CoreError> {
    if film_ids.len() > MAX_FEATURED_FILMS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_FEATURED_FILMS} featured films are allowed, got {}",
            film_ids.len()
        )));
    }
    if press_ids.len() > MAX_FEATURED_PRESS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_FEATURED_PRESS} featured press items are allowed, got {}",
            press_ids.len()
        )));
    }
    validate_unique_ids("featured films", film_ids)?;
    validate_unique_ids("featured press items", press_ids)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_are_inclusive() {
        assert!(validate_featured(&[1, 2, 3, 4], &[1, 2, 3, 4, 5, 6]).is_ok());
    }

    #[test]
    fn five_films_rejected() {
        assert!(validate_featured(&[1, 2, 3, 4, 5], &[]).is_err());
    }

    #[test]
    fn seven_press_items_rejected() {
        assert!(validate_featured(&[], &[1, 2, 3, 4, 5, 6, 7]).is_err());
    }

    #[test]
    fn duplicate_featured_film_rejected() {
        assert!(validate_featured(&[1, 1], &[]).is_err());
    }
}
