//! Ticket fares in Congolese francs

pub const BASE_PRICE: f64 = 2000.0;
pub const LUGGAGE_PRICE: f64 = 500.0;
pub const CURRENCY: &str = "FC";

/// Multipliers for trips leaving Gare Centrale
const ROUTE_MULTIPLIERS: &[(&str, &str, f64)] = &[
    ("GARE_CENTRALE", "MATETE", 1.2),
    ("GARE_CENTRALE", "LIMETE", 1.0),
    ("GARE_CENTRALE", "BANDALUNGWA", 1.1),
    ("GARE_CENTRALE", "NDJILI", 1.5),
    ("GARE_CENTRALE", "MASINA", 1.6),
    ("GARE_CENTRALE", "KIMBANSEKE", 2.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub base_price: f64,
    pub distance_multiplier: f64,
    pub luggage_price: f64,
    pub total_price: f64,
}

/// `Gare Centrale` -> `GARE_CENTRALE`
fn place_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

pub fn distance_multiplier(origin: Option<&str>, destination: Option<&str>) -> f64 {
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return 1.0;
    };
    let (origin, destination) = (place_key(origin), place_key(destination));
    ROUTE_MULTIPLIERS
        .iter()
        .find(|(from, to, _)| *from == origin && *to == destination)
        .map(|(_, _, m)| *m)
        .unwrap_or(1.0)
}

pub fn quote(origin: Option<&str>, destination: Option<&str>, has_luggage: bool) -> PriceQuote {
    let distance_multiplier = distance_multiplier(origin, destination);
    let luggage_price = if has_luggage { LUGGAGE_PRICE } else { 0.0 };
    PriceQuote {
        base_price: BASE_PRICE,
        distance_multiplier,
        luggage_price,
        total_price: BASE_PRICE * distance_multiplier + luggage_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_use_their_multiplier() {
        let q = quote(Some("Gare Centrale"), Some("Kimbanseke"), false);
        assert_eq!(q.distance_multiplier, 2.0);
        assert_eq!(q.total_price, 4000.0);

        let q = quote(Some("GARE_CENTRALE"), Some("matete"), true);
        assert_eq!(q.luggage_price, 500.0);
        assert!((q.total_price - 2900.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_or_reversed_routes_cost_the_base_fare() {
        assert_eq!(quote(Some("Matete"), Some("Gare Centrale"), false).total_price, 2000.0);
        assert_eq!(quote(None, Some("Masina"), false).distance_multiplier, 1.0);
        assert_eq!(quote(Some("Limete"), Some("Ndjili"), true).total_price, 2500.0);
    }
}
