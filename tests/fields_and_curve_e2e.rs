use ndarray::array;
use relief::{
    sample_planar, sample_spatial, AxisSamples, Error, Grid2, Grid3, Indexing, InverseSquare,
    Mountain, QuadraticShear, Spiral, VectorField,
};
use std::f64::consts::TAU;

#[test]
fn quadratic_shear_at_one_one() {
    let v = QuadraticShear.velocity(&array![1.0, 1.0].view());
    assert_eq!(v, array![2.5, -3.0]);

    let grid = Grid2::square(AxisSamples::new(-5.0, 5.0, 11).unwrap(), Indexing::Ij);
    let [u, v] = sample_planar(&QuadraticShear, &grid).unwrap();
    let p = grid.index(6, 6);
    assert_eq!(grid.point(p), (1.0, 1.0));
    assert_eq!((u[p], v[p]), (2.5, -3.0));
}

#[test]
fn inverse_square_falls_off_with_distance() {
    let grid = Grid3::cube(AxisSamples::new(0.5, 2.0, 8).unwrap(), Indexing::Ij);
    let [u, v, w] = sample_spatial(&InverseSquare::default(), &grid).unwrap();
    let norm = |i: usize| {
        let p = grid.index(i, i, i);
        (u[p] * u[p] + v[p] * v[p] + w[p] * w[p]).sqrt()
    };
    for i in 1..8 {
        assert!(norm(i) < norm(i - 1));
    }
    // |F| = 1 / r² along the diagonal.
    let (x, y, z) = grid.point(grid.index(7, 7, 7));
    let r2 = x * x + y * y + z * z;
    assert!((norm(7) - 1.0 / r2).abs() < 1e-12);
}

#[test]
fn inverse_square_refuses_the_origin() {
    let grid = Grid3::cube(AxisSamples::new(-1.0, 1.0, 5).unwrap(), Indexing::Xy);
    assert!(matches!(
        sample_spatial(&InverseSquare::default(), &grid),
        Err(Error::Singular { .. })
    ));
}

#[test]
fn spiral_starts_at_rim_and_ends_at_summit() {
    let m = Mountain::TEXTBOOK;
    let sp = Spiral::default();
    let c = sp.trace(&m).unwrap();

    assert_eq!(c.s[0], 0.0);
    assert_eq!(sp.radius_at(0.0), 10.0);
    let (x0, y0, z0) = c.point(0);
    assert_eq!((x0, y0), (10.0, 0.0));
    assert_eq!(z0, m.elevation_at_distance(10.0));

    let last = c.len() - 1;
    assert_eq!(c.s[last], TAU);
    assert!(sp.radius_at(c.s[last]).abs() < 1e-12);
    assert!((c.z[last] - m.peak()).abs() < 1e-9);
}

#[test]
fn spiral_height_follows_the_mountain() {
    let m = Mountain::SCALED;
    let c = Spiral::default().trace(&m).unwrap();
    for (x, y, z) in c.points() {
        assert!((z - m.elevation(x, y)).abs() < 1e-9);
    }
}
