use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use relief::{sample_planar, AxisSamples, Grid2, Indexing, Mountain, QuadraticShear};

fn pair(nx: usize, ny: usize) -> (Grid2, Grid2) {
    let x = AxisSamples::new(-10.0, 10.0, nx).unwrap();
    let y = AxisSamples::new(-6.0, 8.0, ny).unwrap();
    (
        Grid2::new(x.clone(), y.clone(), Indexing::Ij),
        Grid2::new(x, y, Indexing::Xy),
    )
}

#[test]
fn layouts_are_transposes_of_each_other() {
    let (ij, xy) = pair(7, 5);
    assert_eq!(ij.shape(), (7, 5));
    assert_eq!(xy.shape(), (5, 7));
    let m = Mountain::TEXTBOOK;
    let a = m.sample(&ij);
    let b = m.sample(&xy);
    assert_eq!(a.t(), b);
}

#[test]
fn same_physical_point_same_value_at_random_samples() {
    let (ij, xy) = pair(41, 29);
    let m = Mountain::TEXTBOOK;
    let a = m.sample(&ij);
    let b = m.sample(&xy);
    let [ua, va] = sample_planar(&QuadraticShear, &ij).unwrap();
    let [ub, vb] = sample_planar(&QuadraticShear, &xy).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..500 {
        let ix = rng.gen_range(0..41);
        let iy = rng.gen_range(0..29);
        let (pa, pb) = (ij.index(ix, iy), xy.index(ix, iy));
        assert_eq!(ij.point(pa), xy.point(pb));
        assert_eq!(a[pa], b[pb]);
        assert_eq!(ua[pa], ub[pb]);
        assert_eq!(va[pa], vb[pb]);
    }
}

#[test]
fn gradient_components_agree_across_layouts() {
    let (ij, xy) = pair(21, 15);
    let m = Mountain::TEXTBOOK;
    let [dxa, dya] = ij.gradient(&m.sample(&ij)).unwrap();
    let [dxb, dyb] = xy.gradient(&m.sample(&xy)).unwrap();
    for ix in 0..21 {
        for iy in 0..15 {
            let (pa, pb) = (ij.index(ix, iy), xy.index(ix, iy));
            assert_eq!(dxa[pa], dxb[pb]);
            assert_eq!(dya[pa], dyb[pb]);
        }
    }
}
