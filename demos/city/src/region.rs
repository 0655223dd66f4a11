//! The Rhine-Main road network used by the demo.

use fleet_core::Location;
use fleet_region::{Region, RegionResult};

/// Eight neighborhoods, five interchanges, one restaurant at (3, -1).
pub fn build_region() -> RegionResult<Region> {
    let restaurant = Location::new(3, -1);

    let wiesbaden    = Location::new(-9, -4);
    let mainz        = Location::new(-8, 0);
    let frankfurt    = Location::new(8, -8);
    let darmstadt    = Location::new(6, 8);
    let ruesselsheim = Location::new(-2, 0);
    let gross_gerau  = Location::new(0, 5);
    let langen       = Location::new(6, 0);
    let offenbach    = Location::new(10, -7);

    let mainspitz       = Location::new(-5, 0);
    let wiesbaden_kreuz = Location::new(-4, -5);
    let moenchhof       = Location::new(1, -2);
    let frankfurt_kreuz = Location::new(4, -4);
    let mainz_dreieck   = Location::new(-10, -1);

    Region::builder()
        .add_neighborhood("Wiesbaden", wiesbaden, 0.75)
        .add_neighborhood("Mainz", mainz, 0.6)
        .add_neighborhood("Frankfurt", frankfurt, 1.0)
        .add_neighborhood("Darmstadt", darmstadt, 0.5)
        .add_neighborhood("Ruesselsheim", ruesselsheim, 0.35)
        .add_neighborhood("Gross-Gerau", gross_gerau, 0.2)
        .add_neighborhood("Langen", langen, 0.25)
        .add_neighborhood("Offenbach", offenbach, 0.35)
        .add_warehouse("Restaurant", restaurant)
        .add_node("Mainspitzdreieck", mainspitz)
        .add_node("Wiesbadener Kreuz", wiesbaden_kreuz)
        .add_node("Moenchhof-Dreieck", moenchhof)
        .add_node("Frankfurter Kreuz", frankfurt_kreuz)
        .add_node("Dreieck Mainz", mainz_dreieck)
        .add_edge("A643", mainz_dreieck, wiesbaden)
        .add_edge("A60", mainz_dreieck, mainz)
        .add_edge("A60_1", mainspitz, mainz)
        .add_edge("A671", mainspitz, wiesbaden)
        .add_edge("A60_2", mainspitz, ruesselsheim)
        .add_edge("A66", wiesbaden_kreuz, wiesbaden)
        .add_edge("A66_1", wiesbaden_kreuz, frankfurt)
        .add_edge("A3", wiesbaden_kreuz, moenchhof)
        .add_edge("A67", moenchhof, ruesselsheim)
        .add_edge("A3_1", moenchhof, frankfurt_kreuz)
        .add_edge("A5", frankfurt_kreuz, frankfurt)
        .add_edge("A3_2", frankfurt_kreuz, offenbach)
        .add_edge("A5_1", frankfurt_kreuz, langen)
        .add_edge("A5_2", langen, darmstadt)
        .add_edge("A67_1", gross_gerau, darmstadt)
        .add_edge("A67_2", gross_gerau, ruesselsheim)
        .add_edge("Strasse", restaurant, moenchhof)
        .build()
}
