use chrono::Utc;
use exoclock::{EngineConfig, ExoCatalog, TrackContext};

fn main() -> exoclock::Result<()> {
    let catalog = ExoCatalog::from_json_str(include_str!("../tests/data/kepler-47.json"))?;
    let now = Utc::now();
    let ctx = TrackContext::from_catalog(&EngineConfig::default(), "maar", &catalog, now)?;

    let today = ctx.today_index(&now.with_timezone(&chrono::Local));
    println!("Today index: {today:.4} (track fresh until {})", ctx.expires_at());

    let mut head = ctx.playhead(0.0);
    for step in 0..=8 {
        head.seek(step as f64 / 8.0);
        let frame = head.frame()?;
        print!(
            "{:.3}  {}  b={:.3}",
            frame.index, frame.transit.exact_transit_date, frame.transit.record.b
        );
        for (name, phase) in &frame.orbits {
            print!("  {name}: {:.2}", phase.orbit_position);
        }
        println!();
    }
    Ok(())
}
