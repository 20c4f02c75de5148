//! Terminal login form driven by `formstate`.
//!
//! Prompts for each field, submits, and prints the errors until the form
//! passes. Logs go to `formstate-demo.log`.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use formstate::prelude::*;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

const LOGIN_FORM: &str = r#"{
    "schema": { "email": "", "password": "" },
    "rules": {
        "email": { "validatorFn": { "first_of": [{ "function": "required" }, { "function": "email" }] } },
        "password": { "validatorFn": { "function": "required" } }
    }
}"#;

fn main() {
    let log_file = File::create("formstate-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let declaration: FormDeclaration = LOGIN_FORM.parse().context("parse login form")?;
    let signed_in: Rc<RefCell<Option<FieldValues>>> = Rc::default();

    let mut form = FormEngine::builder()
        .declaration(&declaration, &ValidatorRegistry::with_builtins())
        .on_submit({
            let signed_in = Rc::clone(&signed_in);
            move |values| {
                info!("login submitted");
                *signed_in.borrow_mut() = Some(values);
            }
        })
        .on_errors(|errors| {
            for (field, message) in errors.messages() {
                println!("  {field}: {message}");
            }
        })
        .build()
        .context("build login form")?;

    let fields: Vec<String> = form.fields().map(str::to_string).collect();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        for field in &fields {
            print!("{} [{}]: ", field, form.value(field).unwrap_or_default());
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let line = line?;
            if !line.is_empty() {
                form.change(field, line)?;
            }
        }

        if form.submit().is_submitted() {
            break;
        }
        println!("Please fix the errors above.");
    }

    if let Some(values) = signed_in.borrow().as_ref() {
        println!("Signed in as {}", values.get("email").unwrap_or_default());
    }
    Ok(())
}
