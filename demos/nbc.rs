// Cluster a delimited text file, or synthetic data when no file is given.
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use nbmix::config::Config;
use nbmix::data::{load_file, scale};
use nbmix::prelude::*;

use std::error::Error;
use std::path::PathBuf;

/// Naive-Bayes mixture clustering with random restarts
#[derive(Parser, Debug)]
#[command(name = "nbc")]
struct Args {
    /// Data file, fields split on `,` `;` or `:`. Synthetic data if omitted
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,
    /// Number of clusters
    #[arg(short = 'k', long, default_value_t = Config::default().k)]
    k: usize,
    /// Number of features of synthetic data
    #[arg(short = 'n', long, default_value_t = Config::default().n_features)]
    n_features: usize,
    /// Number of rows of synthetic data
    #[arg(short = 'm', long, default_value_t = Config::default().n_samples)]
    n_samples: usize,
    /// Number of random restarts
    #[arg(short = 'i', long, default_value_t = Config::default().restarts)]
    restarts: usize,
    /// Column of the data file holding the row label
    #[arg(short = 'y', long)]
    label: Option<usize>,
    /// Columns to ignore, e.g. `-I 0,3`
    #[arg(short = 'I', long, value_delimiter = ',')]
    ignore: Vec<usize>,
    /// Print the rows of each cluster
    #[arg(long)]
    show: bool,
    /// Scale numeric columns into [0, 1]
    #[arg(long)]
    scale: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_k(self.k)
            .with_n_features(self.n_features)
            .with_n_samples(self.n_samples)
            .with_restarts(self.restarts)
            .with_label_col(self.label)
            .with_ignore(self.ignore.clone())
            .with_scale(self.scale)
            .with_show(self.show)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().init();

    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(0x1234);

    let mut data = match &args.file {
        Some(path) => load_file(path, config.label_col, &[])?,
        None => {
            let truth = MixtureModel::synthetic(
                config.k,
                config.n_features,
                &mut rng,
            )?;
            println!("Generating model\n{}", truth);
            Dataset::from_samples(truth.sample(config.n_samples, &mut rng)?)
        }
    };

    // rows as read, before columns are dropped, coerced or scaled
    let raw = data.rows.clone();
    data.drop_columns(&config.ignore);
    let n = data.check_width()?;

    println!("# rows     = {}", data.len());
    println!("# features = {}", n);
    println!("# restarts = {}", config.restarts);
    if let Some(col) = config.label_col {
        println!("label      = {}", col);
    }
    if !config.ignore.is_empty() {
        println!("ignored    = {:?}", config.ignore);
    }

    if config.scale {
        let scaled = scale(&mut data.rows);
        println!("scaled columns {:?}", scaled);
    }

    let driver = RestartDriver::from_config(&config)?;
    let fit = driver.fit(&mut data.rows, &mut rng)?;

    for (ix, record) in fit.restarts.iter().enumerate() {
        match record {
            RestartRecord::Fitted {
                n_changed_passes,
                score,
            } => println!(
                "{:3} : {:5} steps  ({:5.3e})",
                ix + 1,
                n_changed_passes,
                score
            ),
            RestartRecord::Failed(err) => {
                println!("{:3} : failed ({})", ix + 1, err)
            }
        }
    }

    println!("Fitted model (score: {})\n{}", fit.score, fit.model);

    let members = fit.model.clustering(&data.rows)?;
    let tallies = data.tally_labels(&members);
    for (zi, (ixs, tally)) in members.iter().zip(tallies.iter()).enumerate() {
        println!("cluster {} : {} {:?}", zi + 1, ixs.len(), tally);
        if config.show {
            for &ix in ixs {
                let row: Vec<String> =
                    raw[ix].iter().map(|x| x.to_string()).collect();
                println!("{} {}", data.labels[ix], row.join(", "));
            }
        }
    }

    Ok(())
}
