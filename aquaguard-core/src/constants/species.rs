//! Default Species Rule Table
//!
//! Acceptable rearing ranges per species, taken from the Indonesian national
//! standard (SNI) for freshwater aquaculture.
//!
//! Each row is `(name, [temp_min, temp_max], [do_min, do_max], [ph_min, ph_max])`
//! with temperature in °C and dissolved oxygen in mg/L. All intervals are
//! closed.

/// Rule row: species name plus temperature, oxygen and pH intervals.
pub type RuleRow = (&'static str, [f32; 2], [f32; 2], [f32; 2]);

/// Standard table loaded by `RuleTable::standard()`.
pub const STANDARD_RULES: [RuleRow; 5] = [
    ("lele",   [22.0, 33.0], [2.0, 6.0], [6.0, 9.0]),  // African catfish
    ("mas",    [20.0, 30.0], [3.0, 8.0], [6.5, 9.0]),  // Common carp
    ("nila",   [20.0, 33.0], [3.0, 8.0], [6.0, 9.0]),  // Nile tilapia
    ("patin",  [24.0, 30.0], [3.0, 7.0], [6.0, 8.5]),  // Pangasius
    ("gurame", [24.0, 30.0], [3.0, 7.0], [6.0, 8.5]),  // Giant gourami
];
