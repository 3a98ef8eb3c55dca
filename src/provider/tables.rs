//! Embedded provider reference data.
//!
//! Frequency -> provider tables per satellite, compiled from KingOfSat
//! bouquet listings. Frequencies are transponder carriers in MHz.

/// Astra 19.2E.
pub const ASTRA_FREQ_PROVIDER: &[(u32, &str)] = &[
    (10714, "Movistar+"),
    (10729, "Movistar+"),
    (10744, "Movistar+"),
    (10758, "Movistar+"),
    (10773, "German FTA"),
    (10788, "Movistar+"),
    (10803, "Movistar+"),
    (10817, "Movistar+"),
    (10832, "Canal+"),
    (10847, "Canal+"),
    (10861, "Canal+"),
    (10876, "Canal+"),
    (10891, "Canal+"),
    (10906, "Canal+"),
    (10920, "German FTA"),
    (10936, "German FTA"),
    (10964, "HD+"),
    (10979, "HD+"),
    (10994, "HD+"),
    (11008, "HD+"),
    (11023, "Sky Deutschland"),
    (11038, "Sky Deutschland"),
    (11052, "Sky Deutschland"),
    (11067, "Sky Deutschland"),
    (11082, "Sky Deutschland"),
    (11097, "Movistar+"),
    (11111, "Sky Deutschland"),
    (11126, "Sky Deutschland"),
    (11141, "Sky Deutschland"),
    (11156, "Sky Deutschland"),
    (11170, "Sky Deutschland"),
    (11185, "Sky Deutschland"),
    (11229, "Sky Deutschland"),
    (11244, "Sky Deutschland"),
    (11258, "Sky Deutschland"),
    (11273, "Sky Deutschland"),
    (11288, "Sky Deutschland"),
    (11302, "Sky Deutschland"),
    (11317, "German FTA"),
    (11347, "Sky Deutschland"),
    (11362, "Sky Deutschland"),
    (11376, "Sky Deutschland"),
    (11391, "German FTA"),
    (11420, "German FTA"),
    (11435, "German FTA"),
    (11464, "German FTA"),
    (11493, "German FTA"),
    (11508, "German FTA"),
    (11523, "German FTA"),
    (11538, "German FTA"),
    (11552, "German FTA"),
    (11582, "German FTA"),
    (11626, "German FTA"),
    (11641, "German FTA"),
    (11670, "German FTA"),
    (11739, "German FTA"),
    (11758, "German FTA"),
    (11778, "German FTA"),
    (11797, "German FTA"),
    (11817, "German FTA"),
    (11836, "German FTA"),
    (11856, "German FTA"),
    (11875, "German FTA"),
    (11895, "German FTA"),
    (11914, "German FTA"),
    (11934, "German FTA"),
    (11953, "German FTA"),
    (11973, "German FTA"),
    (11992, "German FTA"),
    (12012, "German FTA"),
    (12031, "German FTA"),
    (12051, "German FTA"),
    (12070, "HD+"),
    (12109, "HD+"),
    (12148, "HD+"),
    (12187, "HD+"),
    (12226, "HD+"),
    (12265, "HD+"),
    (12304, "HD+"),
    (12343, "HD+"),
    (12382, "HD+"),
    (12421, "HD+"),
    (12460, "HD+"),
];

/// Hotbird 13E.
pub const HOTBIRD_FREQ_PROVIDER: &[(u32, &str)] = &[
    (10719, "Sky Italia"),
    (10727, "Sky Italia"),
    (10758, "Sky Italia"),
    (10775, "Sky Italia"),
    (10796, "Sky Italia"),
    (10814, "Sky Italia"),
    (10853, "Sky Italia"),
    (10873, "NC+"),
    (10892, "NC+"),
    (10911, "NC+"),
    (10930, "NC+"),
    (10949, "NC+"),
    (10971, "Tivusat"),
    (10992, "Tivusat"),
    (11013, "Tivusat"),
    (11034, "beIN Sports"),
    (11054, "beIN Sports"),
    (11075, "beIN Sports"),
    (11096, "beIN Sports"),
    (11117, "Nova"),
    (11137, "Nova"),
    (11158, "Nova"),
    (11178, "Globecast"),
    (11200, "Rai"),
    (11219, "Rai"),
    (11240, "Tivusat"),
    (11261, "Tivusat"),
    (11283, "Digiturk"),
    (11304, "Digiturk"),
    (11325, "NC+"),
    (11355, "NC+"),
    (11373, "NC+"),
    (11393, "NC+"),
    (11411, "Al Jazeera"),
    (11432, "Al Jazeera"),
    (11470, "Al Jazeera"),
    (11508, "Euronews"),
    (11526, "Tivusat"),
    (11566, "Tivusat"),
    (11604, "Tivusat"),
    (11642, "Tivusat"),
    (11681, "France TV"),
    (11727, "France TV"),
    (11766, "France TV"),
    (11804, "France TV"),
    (11843, "France TV"),
    (11881, "France TV"),
    (11919, "France TV"),
    (11958, "France TV"),
    (12015, "beIN Sports"),
    (12034, "beIN Sports"),
    (12054, "beIN Sports"),
    (12073, "beIN Sports"),
    (12092, "beIN Sports"),
    (12111, "Rai"),
    (12130, "Rai"),
    (12149, "Rai"),
    (12169, "Rai"),
    (12207, "Sky Italia"),
    (12245, "Sky Italia"),
    (12284, "Sky Italia"),
    (12322, "Sky Italia"),
    (12360, "Sky Italia"),
    (12399, "Sky Italia"),
    (12437, "Sky Italia"),
    (12476, "Sky Italia"),
    (12520, "Sky Italia"),
    (12558, "Sky Italia"),
    (12597, "Sky Italia"),
    (12635, "Sky Italia"),
    (12673, "Sky Italia"),
    (12713, "Sky Italia"),
];

/// Nilesat 7W, mostly Arabic-language bouquets.
pub const NILESAT_FREQ_PROVIDER: &[(u32, &str)] = &[
    (10719, "Nilesat"),
    (10758, "Nilesat"),
    (10796, "Nilesat"),
    (10815, "MBC"),
    (10853, "MBC"),
    (10892, "MBC"),
    (10930, "beIN Sports MENA"),
    (10971, "beIN Sports MENA"),
    (11013, "beIN Sports MENA"),
    (11054, "OSN"),
    (11096, "OSN"),
    (11137, "OSN"),
    (11176, "ART"),
    (11219, "ART"),
    (11258, "Al Jazeera"),
    (11296, "LBC"),
    (11334, "Rotana"),
    (11373, "Rotana"),
    (11411, "Rotana"),
    (11449, "CBC"),
    (11488, "CBC"),
    (11526, "DMC"),
    (11564, "DMC"),
    (11603, "Egyptian"),
    (11641, "Egyptian"),
    (11680, "Egyptian"),
    (11727, "Egyptian"),
    (11766, "Egyptian"),
    (11804, "MBC"),
    (11843, "MBC"),
    (11881, "MBC"),
    (11919, "MBC"),
    (11958, "MBC"),
    (12015, "Nilesat"),
    (12054, "Nilesat"),
    (12092, "Nilesat"),
    (12130, "Nilesat"),
    (12169, "Nilesat"),
    (12207, "Nilesat"),
    (12245, "Nilesat"),
    (12284, "Nilesat"),
    (12322, "Nilesat"),
    (12360, "Nilesat"),
    (12399, "Nilesat"),
    (12437, "Nilesat"),
    (12476, "Nilesat"),
];

/// Database orbital angle (tenths of a degree, East-positive with a few
/// West positions stored positive) -> satellites-XML position.
pub const ANGLE_TO_POSITION: &[(i64, i32)] = &[
    (192, 190), // Astra 19.2E
    (130, 130), // Hotbird 13E
    (70, -70),  // Nilesat 7W, stored positive but really West
    (80, -80),  // Eutelsat 8W, same convention
];

/// Case-insensitive name-pattern heuristics, tried in order; the first
/// matching pattern wins.
pub const NAME_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)bein|be in", "beIN Sports"),
    (r"(?i)movistar|m\+|mplus", "Movistar+"),
    (r"(?i)canal\+|canal plus|canalsat", "Canal+"),
    (r"(?i)sky( |$)|sky(sport|news|uno|atlantic)", "Sky"),
    (r"(?i)mbc( |[0-9]|$)", "MBC"),
    (r"(?i)rotana", "Rotana"),
    (r"(?i)osn", "OSN"),
    (r"(?i)al ?jazeera|aljazeera", "Al Jazeera"),
    (r"(?i)france ?[0-9]|tf1|m6|arte", "France TV"),
    (r"(?i)^rai |rai ?[0-9]", "RAI"),
    (r"(?i)nova( |$)", "Nova"),
    (r"(?i)trt|show ?tv|kanal ?d|atv", "Turkish"),
    (r"(?i)polsat|tvp|tvn", "NC+/Cyfra+"),
    (r"(?i)zdf|ard|rtl|sat\.?1|pro ?7", "German FTA"),
    (r"(?i)nile ?sat|nile", "Nilesat"),
    (r"(?i)cbc|msr|dmc", "Egyptian"),
];

/// Select the built-in frequency table for a satellite descriptor, matched
/// case-insensitively against known substrings.
pub fn builtin_table(satellite: &str) -> Option<&'static [(u32, &'static str)]> {
    let sat = satellite.to_lowercase();
    if sat.contains("astra") {
        Some(ASTRA_FREQ_PROVIDER)
    } else if sat.contains("hotbird") || sat.contains("hot bird") {
        Some(HOTBIRD_FREQ_PROVIDER)
    } else if sat.contains("nilesat") || sat.contains("nile") {
        Some(NILESAT_FREQ_PROVIDER)
    } else {
        None
    }
}

/// Translate a stored orbital angle into a satellites-XML position.
pub fn angle_to_position(angle: i64) -> Option<i32> {
    ANGLE_TO_POSITION
        .iter()
        .find(|(a, _)| *a == angle)
        .map(|(_, p)| *p)
}
