//! Ship map. Every room is reached from here.

use crate::scene::Scene;
use crate::thing::Thing;

use super::widgets::door;

pub const NAME: &str = "map";

pub fn scene() -> Scene {
    Scene::new(NAME)
        .background("map.png")
        .thing(map_door("map.to_cryo", (100, 200, 100, 80), "cryo", "Cryo room"))
        .thing(map_door("map.to_bridge", (630, 190, 120, 120), "bridge", "Bridge"))
        .thing(map_door("map.to_crew_quarters", (350, 90, 140, 90), "crew_quarters", "Crew quarters"))
        .thing(map_door("map.to_mess", (350, 330, 140, 90), "mess", "Mess"))
        .thing(map_door("map.to_engine", (220, 260, 110, 80), "engine", "Engine room"))
}

fn map_door(name: &str, rect: (i32, i32, i32, i32), target: &str, label: &str) -> Thing {
    door(name, rect, target).describe(format!("{label}."))
}
