//! Fits the house price regression on the CSV dataset and saves the artifact.
//! Running it again overwrites the served artifact, which the web app picks up on restart.

use ndarray::{s, Array1, Array2, ArrayView1};

use crate::artifact::ArtifactStore;
use crate::helpers::tracing::format_elapsed;
use crate::model::RegressionModel;
use crate::opts::TrainOpts;
use crate::prelude::*;
use crate::trainer::dataset::TrainingSample;

pub mod dataset;
pub mod math;

pub fn run(opts: TrainOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "trainer"));
    let start_instant = Instant::now();

    let samples = dataset::load_samples(&opts.data_path)?;
    let model = fit(&samples)?;
    let error = rmse(&model, &samples);
    ArtifactStore::new(&opts.model_path).save(&model)?;

    info!(
        n_samples = samples.len(),
        coefficients = ?model.coefficients,
        intercept = model.intercept,
        rmse = error,
        model_path = ?opts.model_path,
        elapsed = %format_elapsed(start_instant),
        "trained and saved",
    );
    Ok(())
}

#[instrument(skip_all, fields(n_samples = samples.len()))]
pub fn fit(samples: &[TrainingSample]) -> Result<RegressionModel> {
    let (x, y) = to_arrays(samples);
    let beta = math::least_squares(x.view(), y.view()).context("failed to fit the regression")?;
    Ok(RegressionModel {
        coefficients: beta.slice(s![1..]).to_vec(),
        intercept: beta[0],
    })
}

/// Feature matrix in the served column order, and the price vector.
fn to_arrays(samples: &[TrainingSample]) -> (Array2<f64>, Array1<f64>) {
    let x = Array2::from(samples.iter().map(TrainingSample::features).collect::<Vec<_>>());
    let y = samples.iter().map(|sample| sample.price).collect();
    (x, y)
}

fn rmse(model: &RegressionModel, samples: &[TrainingSample]) -> f64 {
    let (x, y) = to_arrays(samples);
    let predictions = x.dot(&ArrayView1::from(&model.coefficients)) + model.intercept;
    math::rmse(predictions.view(), y.view())
}
