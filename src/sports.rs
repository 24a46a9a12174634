/// Sport labels indexed by the numeric code the mobile API reports.
pub const SPORTS: [&str; 51] = [
    "Running",
    "Cycling, transport",
    "Cycling, sport",
    "Mountain biking",
    "Skating",
    "Roller skiing",
    "Skiing, cross country",
    "Skiing, downhill",
    "Snowboarding",
    "Kayaking",
    "Kite surfing",
    "Rowing",
    "Sailing",
    "Windsurfing",
    "Fitness walking",
    "Golfing",
    "Hiking",
    "Orienteering",
    "Walking",
    "Riding",
    "Swimming",
    "Spinning",
    "Other",
    "Aerobics",
    "Badminton",
    "Baseball",
    "Basketball",
    "Boxing",
    "Climbing stairs",
    "Cricket",
    "Cross training",
    "Dancing",
    "Fencing",
    "Football, American",
    "Football, rugby",
    "Football, soccer",
    "Handball",
    "Hockey",
    "Pilates",
    "Polo",
    "Scuba diving",
    "Squash",
    "Table tennis",
    "Tennis",
    "Volleyball, beach",
    "Volleyball, indoor",
    "Weight training",
    "Yoga",
    "Martial arts",
    "Gymnastics",
    "Step counter",
];

pub const OTHER: &str = "Other";

/// Unknown and negative codes map to `"Other"`.
pub fn sport_label(code: i64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| SPORTS.get(i))
        .copied()
        .unwrap_or(OTHER)
}
