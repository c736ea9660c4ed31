use geo::{polygon, MultiPolygon};

pub(crate) fn mp0() -> MultiPolygon {
    MultiPolygon::new(vec![polygon![
        (x: 0., y: 0.),
        (x: 10., y: 0.),
        (x: 10., y: 10.),
        (x: 0., y: 10.),
    ]])
}

/// Two polygons, the first with an interior ring.
pub(crate) fn mp1() -> MultiPolygon {
    MultiPolygon::new(vec![
        polygon!(
            exterior: [
                (x: 20., y: 20.),
                (x: 30., y: 20.),
                (x: 30., y: 30.),
                (x: 20., y: 30.),
            ],
            interiors: [[
                (x: 22., y: 22.),
                (x: 24., y: 22.),
                (x: 24., y: 24.),
                (x: 22., y: 24.),
            ]],
        ),
        polygon![
            (x: 40., y: 40.),
            (x: 45., y: 40.),
            (x: 45., y: 45.),
        ],
    ])
}
