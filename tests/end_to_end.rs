use indoc::indoc;
use nbmix::data::{parse_delimited, scale};
use nbmix::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Ten points near 0 labelled "lo", ten near 10 labelled "hi"
const TWO_BLOBS: &str = indoc! {"
    0.00;lo
    0.31;lo
    -0.42;lo
    0.15;lo
    -0.08;lo
    0.27;lo
    -0.33;lo
    0.49;lo
    -0.12;lo
    0.05;lo
    10.02;hi
    9.71;hi
    10.38;hi
    9.86;hi
    10.11;hi
    9.64;hi
    10.45;hi
    9.93;hi
    10.21;hi
    9.79;hi
"};

#[test]
fn two_gaussian_blobs_are_recovered() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut data = parse_delimited(TWO_BLOBS, Some(1), &[]).unwrap();
    assert_eq!(data.check_width(), Ok(1));

    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let driver = RestartDriver::new(2, 10).unwrap();
    let fit = driver.fit(&mut data.rows, &mut rng).unwrap();

    assert!(data.rows.iter().all(|row| row[0].is_real()));

    let members = fit.model.clustering(&data.rows).unwrap();
    let tallies = data.tally_labels(&members);

    // each cluster holds exactly one blob
    let mut sizes: Vec<usize> = members.iter().map(|ixs| ixs.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![10, 10]);
    assert!(tallies.iter().all(|tally| tally.len() == 1));

    let mut means: Vec<f64> = (0..2)
        .map(|zi| match fit.model.component(zi, 0).unwrap() {
            Distribution::Gaussian(g) => g.mu(),
            other => panic!("expected gaussian, got {}", other),
        })
        .collect();
    means.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!(means[0].abs() < 0.5);
    assert!((means[1] - 10.0).abs() < 0.5);

    assert::close(fit.model.weights().to_vec(), vec![0.5, 0.5], 1E-12);
}

#[test]
fn scaled_blobs_are_recovered() {
    let mut data = parse_delimited(TWO_BLOBS, Some(1), &[]).unwrap();
    assert_eq!(scale(&mut data.rows), vec![0]);
    assert!(data
        .rows
        .iter()
        .all(|row| (0.0..=1.0).contains(&row[0].as_real().unwrap())));

    let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
    let driver = RestartDriver::new(2, 10).unwrap();
    let fit = driver.fit(&mut data.rows, &mut rng).unwrap();

    let tallies = data.tally_labels(&fit.model.clustering(&data.rows).unwrap());
    assert!(tallies.iter().all(|tally| tally.len() == 1));
}

#[test]
fn fit_on_synthetic_data_keeps_every_row() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let config = Config::default();
    let truth =
        MixtureModel::synthetic(config.k, config.n_features, &mut rng).unwrap();
    let mut data =
        Dataset::from_samples(truth.sample(config.n_samples, &mut rng).unwrap());
    assert_eq!(data.check_width(), Ok(config.n_features));

    let driver = RestartDriver::from_config(&config).unwrap();
    let fit = driver.fit(&mut data.rows, &mut rng).unwrap();

    assert_eq!(fit.model.k(), config.k);
    assert_eq!(fit.model.n(), config.n_features);
    assert_eq!(fit.restarts.len(), config.restarts);

    let tallies = data.tally_labels(&fit.model.clustering(&data.rows).unwrap());
    let total: usize = tallies.iter().flat_map(|tally| tally.values()).sum();
    assert_eq!(total, config.n_samples);
}

#[test]
fn mixed_columns_are_sniffed_per_column() {
    let text = indoc! {"
        1.5,red,a
        2.5,red,b
        3.5,blue,c
        4.5,blue,d
        5.5,red,e
        6.5,blue,f
        7.5,red,g
        8.5,blue,h
        9.5,red,i
        10.5,blue,j
        11.5,red,k
    "};
    let mut data = parse_delimited(text, Some(2), &[]).unwrap();
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);

    let mm = MixtureModel::from_data(2, &mut data.rows, &mut rng).unwrap();

    assert_eq!(mm.component(0, 0).unwrap().kind(), "gaussian");
    assert_eq!(mm.component(0, 1).unwrap().kind(), "categorical");
    assert_eq!(data.rows[0][0], Datum::Real(1.5));
    assert_eq!(data.labels[10], "k");
}
