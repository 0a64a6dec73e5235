use cdamage::base::{new_sym, sym_from_slice, DamageError, ParamDamagedModel};
use cdamage::damage::DamagedModel;
use std::fs;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "damage_uniaxial",
    about = "Runs a proportional uniaxial-strain history through a damaged stress-strain model"
)]
struct Options {
    /// JSON file with the model parameters
    param: String,

    /// Final strain εxx
    #[structopt(long)]
    strain: f64,

    /// Final time
    #[structopt(long)]
    time: f64,

    /// Number of steps
    #[structopt(long, default_value = "10")]
    steps: usize,

    /// Temperature (held constant)
    #[structopt(long, default_value = "20.0")]
    temperature: f64,

    /// Prints the Newton iterations
    #[structopt(long)]
    verbose: bool,
}

fn main() -> Result<(), DamageError> {
    // parse options
    let options = Options::from_args();
    if options.steps < 1 {
        return Err(DamageError::config("the number of steps must be ≥ 1"));
    }

    // load parameters
    let json = fs::read_to_string(&options.param)
        .map_err(|e| DamageError::Configuration(format!("cannot read {}: {}", options.param, e)))?;
    let mut param: ParamDamagedModel = serde_json::from_str(&json)
        .map_err(|e| DamageError::Configuration(format!("cannot parse {}: {}", options.param, e)))?;
    if options.verbose {
        param.settings.verbose = true;
    }
    let model = DamagedModel::from_param(&param)?;

    // initial state
    let tt = options.temperature;
    let mut e_n = new_sym();
    let mut s_n = new_sym();
    let mut h_n = model.initialize_history(&s_n)?;
    let mut t_n = 0.0;
    let mut u_n = 0.0;
    let mut p_n = 0.0;

    // run
    println!(
        "{:>5} {:>13} {:>13} {:>13} {:>13} {:>5}",
        "step", "time", "εxx", "σxx", "damage", "iter"
    );
    let d0 = model.total_damage(&h_n)?;
    println!("{:>5} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>5}", 0, t_n, 0.0, 0.0, d0, 0);
    let n = options.steps as f64;
    for k in 1..=options.steps {
        let fraction = (k as f64) / n;
        let t_np1 = options.time * fraction;
        let e_np1 = sym_from_slice(&[options.strain * fraction, 0.0, 0.0, 0.0, 0.0, 0.0])?;
        let trial = model.make_trial_state(&e_np1, &e_n, &s_n, &h_n, tt, tt, t_np1, t_n, u_n, p_n)?;
        let res = model.update(&trial)?;
        println!(
            "{:>5} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>5}",
            k,
            t_np1,
            e_np1.vector()[0],
            res.stress.vector()[0],
            model.total_damage(&res.history)?,
            res.stats.iterations
        );
        e_n = e_np1;
        s_n = res.stress;
        h_n = res.history;
        t_n = t_np1;
        u_n = res.energy;
        p_n = res.work;
    }
    println!("\nstrain energy = {:.6e}, dissipated work = {:.6e}", u_n, p_n);
    Ok(())
}
