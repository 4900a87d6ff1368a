use groupforge::roster::Roster;

/// Builds a roster where member `i` gets id `"s<i>"` and the given
/// attribute tuples.
pub fn roster_from(attrs: &[&[&str]]) -> Roster {
    let attr_count = attrs.first().map_or(0, |a| a.len());
    let attr_names: Vec<String> = (0..attr_count).map(|k| format!("attr{}", k)).collect();
    let records = attrs.iter().enumerate().map(|(i, row)| {
        (
            format!("s{}", i),
            row.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        )
    });
    Roster::from_records(attr_names, records).expect("roster construction failed")
}

/// The classic smoke population: 4 A's and 4 B's on one attribute.
/// Any partition into two groups of 2+2 per value scores 0.
pub fn half_and_half() -> Roster {
    roster_from(&[
        &["A"],
        &["A"],
        &["A"],
        &["A"],
        &["B"],
        &["B"],
        &["B"],
        &["B"],
    ])
}
