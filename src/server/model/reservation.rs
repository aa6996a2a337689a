//! Reservation domain models, amenity rules and price quoting.

use chrono::{DateTime, NaiveDate, Utc};
use entity::sea_orm_active_enums::{Amenity, ReservationStatus};
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;

use crate::{
    model::reservation::{CreateReservationDto, ReservationDto},
    server::error::AppError,
};

/// Largest accepted difference between a client total and the computed quote.
pub const PRICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub trait AmenityPricing {
    /// Flat per-reservation surcharge.
    fn surcharge(&self) -> Decimal;
}

impl AmenityPricing for Amenity {
    fn surcharge(&self) -> Decimal {
        match self {
            Amenity::None => Decimal::ZERO,
            Amenity::BabySitter => Decimal::new(2000, 2),
            Amenity::Gps => Decimal::new(1000, 2),
            Amenity::PowerBank => Decimal::new(500, 2),
        }
    }
}

/// A validated amenity list: either exactly `none`, or paid add-ons charged per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenitySelection(Vec<Amenity>);

impl AmenitySelection {
    /// Parses wire tags in order. Tags must match exactly; repeated tags are each charged.
    pub fn parse(tags: &[String]) -> Result<Self, AppError> {
        if tags.is_empty() {
            return Err(AppError::bad_request(
                "At least one amenity or 'none' is required",
            ));
        }

        let amenities = tags
            .iter()
            .map(|tag| {
                Amenity::try_from_value(tag)
                    .map_err(|_| AppError::bad_request(format!("Invalid amenity: {}", tag)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if amenities.contains(&Amenity::None) && amenities.len() > 1 {
            return Err(AppError::bad_request(
                "'none' cannot be combined with other amenities",
            ));
        }

        Ok(Self(amenities))
    }

    pub fn from_stored(amenities: Vec<Amenity>) -> Self {
        Self(amenities)
    }

    pub fn amenities(&self) -> &[Amenity] {
        &self.0
    }

    pub fn surcharge(&self) -> Decimal {
        self.0.iter().map(AmenityPricing::surcharge).sum()
    }

    pub fn tags(&self) -> Vec<String> {
        self.0.iter().map(|a| a.to_value()).collect()
    }
}

/// Rental length in days, counting both the pickup and the return day.
pub fn rental_days(rental_date: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - rental_date).num_days() + 1
}

/// Computed price for a rental window.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub days: i64,
    pub base: Decimal,
    pub amenity_cost: Decimal,
}

impl Quote {
    pub fn new(
        price_per_day: Decimal,
        rental_date: NaiveDate,
        return_date: NaiveDate,
        amenities: &AmenitySelection,
    ) -> Self {
        let days = rental_days(rental_date, return_date);
        Self {
            days,
            base: price_per_day * Decimal::from(days),
            amenity_cost: amenities.surcharge(),
        }
    }

    pub fn total(&self) -> Decimal {
        self.base + self.amenity_cost
    }

    /// Checks a client-supplied total against this quote.
    pub fn check(&self, received: Decimal) -> Result<(), AppError> {
        let expected = self.total();
        if (received - expected).abs() > PRICE_TOLERANCE {
            return Err(AppError::bad_request(format!(
                "Total price mismatch. Expected: {:.2}, Received: {:.2}",
                expected, received
            )));
        }
        Ok(())
    }
}

/// Booking request that passed the checks which need no database access.
#[derive(Debug, Clone)]
pub struct CreateReservationParams {
    pub vehicle_id: i32,
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    pub amenities: AmenitySelection,
    pub total_price: Decimal,
}

impl CreateReservationParams {
    /// Validates presence, date ordering and amenity rules, in that order.
    pub fn from_dto(dto: CreateReservationDto) -> Result<Self, AppError> {
        let vehicle_id = dto
            .vehicle_id
            .ok_or_else(|| AppError::bad_request("Vehicle is required"))?;
        let user_id = dto
            .user_id
            .ok_or_else(|| AppError::bad_request("User ID is required"))?;
        let (Some(rental_date), Some(return_date)) = (dto.rental_date, dto.return_date) else {
            return Err(AppError::bad_request("Rental and return dates are required"));
        };
        let total_price = dto
            .total_price
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| AppError::bad_request("Total price must be greater than zero"))?;

        if return_date < rental_date {
            return Err(AppError::bad_request(
                "Return date must be after rental date",
            ));
        }

        let amenities = AmenitySelection::parse(&dto.amenities.unwrap_or_default())?;

        Ok(Self {
            vehicle_id,
            user_id,
            rental_date,
            return_date,
            amenities,
            total_price,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub vehicle_id: i32,
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    pub amenities: AmenitySelection,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn from_entity(
        entity: entity::reservation::Model,
        amenities: Vec<entity::reservation_amenity::Model>,
    ) -> Self {
        let mut tags: Vec<Amenity> = Vec::with_capacity(amenities.len());
        for row in amenities {
            if !tags.contains(&row.amenity) {
                tags.push(row.amenity);
            }
        }

        Self {
            id: entity.id,
            vehicle_id: entity.vehicle_id,
            user_id: entity.user_id,
            rental_date: entity.rental_date,
            return_date: entity.return_date,
            amenities: AmenitySelection::from_stored(tags),
            total_price: entity.total_price,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn days(&self) -> i64 {
        rental_days(self.rental_date, self.return_date)
    }

    pub fn into_dto(self) -> ReservationDto {
        ReservationDto {
            id: self.id,
            vehicle_id: self.vehicle_id,
            user_id: self.user_id,
            rental_date: self.rental_date,
            return_date: self.return_date,
            days: self.days(),
            amenities: self.amenities.tags(),
            total_price: self.total_price.round_dp(2),
            status: self.status.to_value(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn message<T: std::fmt::Debug>(result: Result<T, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    fn dto() -> CreateReservationDto {
        CreateReservationDto {
            vehicle_id: Some(1),
            user_id: Some(2),
            rental_date: Some(date(2024, 1, 1)),
            return_date: Some(date(2024, 1, 3)),
            amenities: Some(tags(&["gps"])),
            total_price: Some(Decimal::new(16000, 2)),
        }
    }

    /// Tests that both the pickup and return days are charged.
    ///
    /// Expected: 2024-01-01 to 2024-01-03 is 3 days, same-day is 1 day
    #[test]
    fn rental_days_are_inclusive() {
        assert_eq!(rental_days(date(2024, 1, 1), date(2024, 1, 3)), 3);
        assert_eq!(rental_days(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(rental_days(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn none_cannot_be_combined() {
        assert_eq!(
            message(AmenitySelection::parse(&tags(&["none", "gps"]))),
            "'none' cannot be combined with other amenities"
        );
    }

    #[test]
    fn rejects_unknown_and_empty_amenities() {
        assert_eq!(
            message(AmenitySelection::parse(&tags(&["jetpack"]))),
            "Invalid amenity: jetpack"
        );
        assert_eq!(
            message(AmenitySelection::parse(&[])),
            "At least one amenity or 'none' is required"
        );
    }

    #[test]
    fn surcharges_add_up() {
        let all = AmenitySelection::parse(&tags(&["baby-sitter", "gps", "power-bank"])).unwrap();
        assert_eq!(all.amenities().len(), 3);
        assert_eq!(all.surcharge(), Decimal::new(3500, 2));

        let none = AmenitySelection::parse(&tags(&["none"])).unwrap();
        assert_eq!(none.surcharge(), Decimal::ZERO);
    }

    /// Tests that a repeated tag is charged once per occurrence.
    ///
    /// Expected: ["gps", "gps"] costs 20.00 and a 3 day quote at 50.00/day totals 170.00
    #[test]
    fn repeated_tags_are_charged_each_time() {
        let twice = AmenitySelection::parse(&tags(&["gps", "gps"])).unwrap();
        assert_eq!(twice.amenities(), &[Amenity::Gps, Amenity::Gps]);
        assert_eq!(twice.surcharge(), Decimal::new(2000, 2));

        let quote = Quote::new(
            Decimal::new(5000, 2),
            date(2024, 1, 1),
            date(2024, 1, 3),
            &twice,
        );
        assert!(quote.check(Decimal::new(17000, 2)).is_ok());
        assert!(quote.check(Decimal::new(16000, 2)).is_err());
    }

    /// Tests that tags are matched exactly.
    ///
    /// Expected: uppercase and padded tags are rejected with the raw tag in the message
    #[test]
    fn tags_are_case_and_space_sensitive() {
        assert_eq!(
            message(AmenitySelection::parse(&tags(&["GPS"]))),
            "Invalid amenity: GPS"
        );
        assert_eq!(
            message(AmenitySelection::parse(&tags(&[" gps "]))),
            "Invalid amenity:  gps "
        );
    }

    #[test]
    fn none_twice_is_rejected() {
        assert_eq!(
            message(AmenitySelection::parse(&tags(&["none", "none"]))),
            "'none' cannot be combined with other amenities"
        );
    }

    /// Tests the quote tolerance boundary.
    ///
    /// Expected: totals within 0.01 of base + surcharge accepted, beyond rejected
    #[test]
    fn quote_accepts_within_tolerance() {
        let amenities = AmenitySelection::parse(&tags(&["gps"])).unwrap();
        let quote = Quote::new(
            Decimal::new(5000, 2),
            date(2024, 1, 1),
            date(2024, 1, 3),
            &amenities,
        );

        assert_eq!(quote.total(), Decimal::new(16000, 2));
        assert!(quote.check(Decimal::new(16000, 2)).is_ok());
        assert!(quote.check(Decimal::new(16001, 2)).is_ok());
        assert!(quote.check(Decimal::new(15999, 2)).is_ok());
        assert_eq!(
            message(quote.check(Decimal::new(16002, 2))),
            "Total price mismatch. Expected: 160.00, Received: 160.02"
        );
    }

    #[test]
    fn params_validate_in_order() {
        let mut d = dto();
        d.vehicle_id = None;
        assert_eq!(message(CreateReservationParams::from_dto(d)), "Vehicle is required");

        let mut d = dto();
        d.user_id = None;
        assert_eq!(message(CreateReservationParams::from_dto(d)), "User ID is required");

        let mut d = dto();
        d.return_date = None;
        assert_eq!(
            message(CreateReservationParams::from_dto(d)),
            "Rental and return dates are required"
        );

        let mut d = dto();
        d.total_price = Some(Decimal::ZERO);
        assert_eq!(
            message(CreateReservationParams::from_dto(d)),
            "Total price must be greater than zero"
        );

        let mut d = dto();
        d.return_date = Some(date(2023, 12, 31));
        assert_eq!(
            message(CreateReservationParams::from_dto(d)),
            "Return date must be after rental date"
        );

        let mut d = dto();
        d.amenities = None;
        assert_eq!(
            message(CreateReservationParams::from_dto(d)),
            "At least one amenity or 'none' is required"
        );
    }
}
