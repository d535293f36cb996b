use std::{fs, path::PathBuf};

use crate::args::types::{Args, CleanArgs};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    // split by semi-colon
    let files = file.split(';');
    for file in files {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if a startup script file cannot be read
pub fn validate_and_clean(args: Args) -> Result<CleanArgs, String> {
    let combined_sql_script = match &args.db_startup_script {
        Some(scripts) => {
            let mut combined = String::new();
            for script in scripts.split(';') {
                let contents = fs::read_to_string(script)
                    .map_err(|e| format!("Could not read sql startup script '{script}': {e}"))?;
                combined.push_str(&contents);
                combined.push('\n');
            }
            combined
        }
        None => String::new(),
    };

    Ok(CleanArgs {
        db_type: args.db_type,
        port: args.port,
        db_host: args.db_host,
        db_port: args.db_port,
        db_user: args.db_user,
        db_password: args.db_password,
        db_name: args.db_name,
        db_startup_script: args.db_startup_script,
        combined_sql_script,
    })
}
