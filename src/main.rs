use std::{env, process};

use volcanodb::VolcanoDB;

fn run(
    plan_path: &str,
    data_dir: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = VolcanoDB::new(data_dir)?;
    let rs = db.execute_file(plan_path)?;
    if json_output {
        println!("{}", serde_json::to_string(&rs)?);
    } else {
        for row in &rs.rows {
            println!("{}", rs.format_row(row));
        }
        println!("Returned {} rows.", rs.rows.len());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json_output = args.iter().any(|a| a == "--json");
    let paths: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();
    if paths.len() != 2 {
        eprintln!("Usage: volcanodb <path_to_plan.json> <path_to_data_directory> [--json]");
        process::exit(2);
    }
    log::debug!("plan: {}, data dir: {}", paths[0], paths[1]);

    if let Err(e) = run(paths[0], paths[1], json_output) {
        eprintln!("Error during execution: {e}");
        process::exit(1);
    }
}
