use geo::{line_string, MultiLineString};

pub(crate) fn ml0() -> MultiLineString {
    MultiLineString::new(vec![line_string![
        (x: 3.31, y: 50.80),
        (x: 3.31, y: 51.50),
        (x: 5.91, y: 51.50),
    ]])
}

pub(crate) fn ml1() -> MultiLineString {
    MultiLineString::new(vec![
        line_string![
            (x: 3.31, y: 50.80),
            (x: 3.31, y: 51.50),
        ],
        line_string![
            (x: 4.60, y: 50.90),
            (x: 4.60, y: 51.30),
            (x: 5.10, y: 51.30),
        ],
    ])
}
