use agora_ecc::analysis::points;
use agora_ecc::{analyze, prefilter, AnalysisConfig, CountingMethod, Curve};
use dotenv::dotenv;
use num_bigint::BigInt;
use structopt::StructOpt;

use std::error::Error;

// Settings are read from `ECC_*` variables, optionally placed in a `.env`
// file in the working directory, e.g. ECC_MAX_MODULUS_BITS=80.

#[derive(StructOpt)]
struct Opt {
    #[structopt(help = "prime modulus of the base field")]
    p: BigInt,
    #[structopt(allow_hyphen_values = true, help = "coefficient a of y^2 = x^3 + ax + b")]
    a: BigInt,
    #[structopt(allow_hyphen_values = true, help = "coefficient b of y^2 = x^3 + ax + b")]
    b: BigInt,
    #[structopt(long, help = "screen the input like the old web form did")]
    legacy: bool,
    #[structopt(long, help = "count by enumeration")]
    enumerate: bool,
    #[structopt(long, help = "count by baby-step giant-step")]
    bsgs: bool,
    #[structopt(long, help = "print every point (small fields only)")]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let _ = env_logger::try_init();
    let opt = Opt::from_args();

    if opt.legacy {
        prefilter::check(&opt.p, &opt.a, &opt.b)?;
    }

    let mut config = AnalysisConfig::from_env()?;
    if opt.enumerate {
        config = config.with_method(CountingMethod::Enumerate);
    } else if opt.bsgs {
        config = config.with_method(CountingMethod::BabyStepGiantStep);
    }

    let summary = analyze(opt.p.clone(), opt.a.clone(), opt.b.clone(), &config)?;
    println!("{}", summary);
    println!("counted with {:?}, trace {}", summary.method(), summary.trace());

    if opt.list {
        let curve = Curve::from_params(opt.p, opt.a, opt.b)?;
        for point in points(&curve, config.max_enumeration_modulus)? {
            println!("{}", point);
        }
    }
    Ok(())
}
