//! Deterministic coordinate-to-timezone lookup.
//!
//! Maps coordinates to an IANA zone name with a coarse bounding-box table
//! covering the zones the directory mostly serves, falling back to the
//! longitude-derived `Etc/GMT` zones everywhere else. Pure function of its
//! inputs: same coordinates, same zone, no network.

struct ZoneBox {
    zone: &'static str,
    lat: (f64, f64),
    lon: (f64, f64),
}

impl ZoneBox {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat.0 && lat <= self.lat.1 && lon >= self.lon.0 && lon <= self.lon.1
    }
}

/// Checked in order; more specific boxes come before the ones they overlap.
const ZONES: &[ZoneBox] = &[
    ZoneBox {
        zone: "Pacific/Honolulu",
        lat: (18.5, 22.5),
        lon: (-160.5, -154.5),
    },
    ZoneBox {
        zone: "America/Anchorage",
        lat: (51.0, 71.5),
        lon: (-170.0, -129.0),
    },
    // Arizona sits inside the Mountain box but does not observe DST
    ZoneBox {
        zone: "America/Phoenix",
        lat: (31.3, 37.0),
        lon: (-114.9, -109.0),
    },
    ZoneBox {
        zone: "America/Los_Angeles",
        lat: (32.5, 49.0),
        lon: (-125.0, -114.0),
    },
    ZoneBox {
        zone: "America/Denver",
        lat: (31.0, 49.0),
        lon: (-114.0, -102.0),
    },
    ZoneBox {
        zone: "America/Chicago",
        lat: (25.8, 49.4),
        lon: (-106.6, -87.5),
    },
    ZoneBox {
        zone: "America/New_York",
        lat: (24.5, 47.5),
        lon: (-87.5, -66.9),
    },
];

/// IANA zone for a coordinate pair.
pub fn zone_for_coordinates(lat: f64, lon: f64) -> String {
    for candidate in ZONES {
        if candidate.contains(lat, lon) {
            return candidate.zone.to_string();
        }
    }

    // Etc/GMT zones use the POSIX sign convention: Etc/GMT-9 is UTC+9
    let offset = (lon / 15.0).round() as i64;
    if offset == 0 {
        "Etc/GMT".to_string()
    } else if offset > 0 {
        format!("Etc/GMT-{}", offset)
    } else {
        format!("Etc/GMT+{}", -offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_york() {
        assert_eq!(zone_for_coordinates(40.7484, -73.9967), "America/New_York");
    }

    #[test]
    fn los_angeles() {
        assert_eq!(zone_for_coordinates(34.05, -118.24), "America/Los_Angeles");
    }

    #[test]
    fn phoenix_beats_the_mountain_box() {
        assert_eq!(zone_for_coordinates(33.45, -112.07), "America/Phoenix");
    }

    #[test]
    fn denver() {
        assert_eq!(zone_for_coordinates(39.74, -104.99), "America/Denver");
    }

    #[test]
    fn chicago() {
        assert_eq!(zone_for_coordinates(41.88, -87.63), "America/Chicago");
    }

    #[test]
    fn honolulu() {
        assert_eq!(zone_for_coordinates(21.31, -157.86), "Pacific/Honolulu");
    }

    #[test]
    fn greenwich_falls_back_to_etc_gmt() {
        assert_eq!(zone_for_coordinates(51.48, 0.0), "Etc/GMT");
    }

    #[test]
    fn tokyo_falls_back_to_utc_plus_nine() {
        assert_eq!(zone_for_coordinates(35.68, 139.69), "Etc/GMT-9");
    }

    #[test]
    fn rio_falls_back_to_utc_minus_three() {
        assert_eq!(zone_for_coordinates(-22.91, -43.17), "Etc/GMT+3");
    }

    #[test]
    fn lookup_is_deterministic() {
        let first = zone_for_coordinates(40.7484, -73.9967);
        let second = zone_for_coordinates(40.7484, -73.9967);
        assert_eq!(first, second);
    }
}
