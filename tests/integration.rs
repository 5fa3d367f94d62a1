#![cfg(feature = "serde")]

use chrono::{NaiveDate, TimeZone, Utc};
use exoclock::{
    gregorian_to_julian, julian_to_date, EngineConfig, EngineError, ExoCatalog, JulianDate,
    TrackContext, TransitBJD, TBJD,
};

const KEPLER_47: &str = include_str!("data/kepler-47.json");

fn kepler_context() -> TrackContext {
    let catalog = ExoCatalog::from_json_str(KEPLER_47).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap();
    TrackContext::from_catalog(&EngineConfig::default(), "maar", &catalog, now).unwrap()
}

#[test]
fn catalog_resolves_default_track() {
    let ctx = kepler_context();
    assert_eq!(ctx.transits().len(), 8);
    assert_eq!(ctx.orbits().reference().name, "b");
    let names: Vec<_> = ctx.orbits().bodies().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["b", "c", "d"]);
}

#[test]
fn interpolated_dates_are_epoch_shifted_and_grid_dates_are_not() {
    let ctx = kepler_context();

    let between = ctx.playhead(1.0 / 14.0).frame().unwrap().transit;
    assert!(!between.exact);
    assert!((between.record.bjd.value() - 35.25).abs() < 1e-9);
    assert_eq!(between.exact_transit_date, "22-07-2009");

    let middle = ctx.playhead(0.5).frame().unwrap().transit;
    assert_eq!(middle.exact_transit_date, "18-12-2009");

    let last = ctx.playhead(1.0).frame().unwrap().transit;
    assert!(last.exact);
    assert_eq!(last.record, ctx.transits().records()[7]);
    assert_eq!(last.interpolated_bjd, JulianDate::new(357.0));
    assert_eq!(last.exact_transit_date, julian_to_date(357.0).unwrap());
}

#[test]
fn today_index_tracks_the_calendar() {
    let ctx = kepler_context();
    let table = ctx.transits();

    // First transit sits at TBJD 10.5, i.e. 2009-06-28 0h.
    let first = NaiveDate::from_ymd_opt(2009, 6, 28).unwrap();
    assert_eq!(gregorian_to_julian(2009, 6, 28).to::<TBJD>(), TransitBJD::new(10.5));
    assert_eq!(table.today_index(first), 0.0);

    let before = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    assert_eq!(table.today_index(before), 0.0);

    let inside = NaiveDate::from_ymd_opt(2009, 7, 12).unwrap();
    let expected = (24.5 - 10.5) / 49.5 / 7.0;
    assert!((table.today_index(inside) - expected).abs() < 1e-12);

    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    assert_eq!(ctx.today_index(&now), 1.0);
}

#[test]
fn frame_orbits_follow_reference_period() {
    let ctx = kepler_context();
    let frame = ctx.playhead(0.5).frame().unwrap();
    assert_eq!(frame.orbits.len(), 3);

    let b = frame.orbits["b"];
    assert!((b.day_in_orbit.value() - 49.514 / 2.0).abs() < 1e-9);
    assert!((b.orbit_position - 0.5).abs() < 1e-9);

    for phase in frame.orbits.values() {
        assert!((0.0..=1.0).contains(&phase.orbit_position));
        assert!(phase.day_in_orbit < phase.period);
    }
}

#[test]
fn unknown_system_in_config_is_missing_data() {
    let catalog = ExoCatalog::from_json_str(KEPLER_47).unwrap();
    let config = EngineConfig::from_toml_str(r#"system = "Kepler-16""#).unwrap();
    let err = TrackContext::from_catalog(&config, "maar", &catalog, Utc::now()).unwrap_err();
    assert!(matches!(err, EngineError::MissingData(_)));
}

#[test]
fn context_refresh_reloads_from_catalog() {
    let mut ctx = kepler_context();
    let later = ctx.expires_at();
    let reloaded = ctx
        .refresh_if_expired(later, |_| {
            let catalog = ExoCatalog::from_json_str(KEPLER_47)?;
            let transits = catalog.transit_table("Kepler-47", "Maar_World")?;
            let orbits = catalog.orbital_system("Kepler-47", "c")?;
            Ok((transits, orbits))
        })
        .unwrap();
    assert!(reloaded);
    assert_eq!(ctx.orbits().reference().name, "c");
    assert_eq!(ctx.loaded_at(), later);
}
