use super::*;

fn params() -> VehicleSearchParams {
    VehicleSearchParams {
        location: None,
        vehicle_type: None,
        min_price: None,
        max_price: None,
        status: VehicleStatus::Available,
    }
}

/// Tests filtering by location, type and price range.
///
/// Expected: only vehicles matching every supplied filter, cheapest first
#[tokio::test]
async fn filters_by_all_criteria() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let cheap = factory::vehicle::VehicleFactory::new(db)
        .location("Airport")
        .vehicle_type("SUV")
        .price_per_day(Decimal::new(4000, 2))
        .build()
        .await?;
    let pricey = factory::vehicle::VehicleFactory::new(db)
        .location("Airport")
        .vehicle_type("SUV")
        .price_per_day(Decimal::new(9000, 2))
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db)
        .location("Downtown")
        .vehicle_type("SUV")
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db)
        .location("Airport")
        .vehicle_type("SUV")
        .status(VehicleStatus::Rented)
        .build()
        .await?;

    let repo = VehicleRepository::new(db);

    let results = repo
        .search(VehicleSearchParams {
            location: Some("Airport".to_string()),
            vehicle_type: Some("SUV".to_string()),
            ..params()
        })
        .await?;
    let ids: Vec<i32> = results.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![cheap.id, pricey.id]);

    let results = repo
        .search(VehicleSearchParams {
            location: Some("Airport".to_string()),
            max_price: Some(Decimal::new(5000, 2)),
            ..params()
        })
        .await?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, cheap.id);

    Ok(())
}

/// Tests the distinct location and type listings.
///
/// Expected: sorted values without duplicates
#[tokio::test]
async fn lists_distinct_locations_and_types() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (location, vehicle_type) in [("Harbor", "Van"), ("Airport", "SUV"), ("Harbor", "SUV")] {
        factory::vehicle::VehicleFactory::new(db)
            .location(location)
            .vehicle_type(vehicle_type)
            .build()
            .await?;
    }

    let repo = VehicleRepository::new(db);
    assert_eq!(repo.distinct_locations().await?, vec!["Airport", "Harbor"]);
    assert_eq!(repo.distinct_types().await?, vec!["SUV", "Van"]);

    Ok(())
}
