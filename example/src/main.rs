use defer_guard::{defer, TryGuard};
use std::cell::RefCell;
use std::panic;
use std::time::Duration;

/// Collects notes while a call runs and prints them when it ends
#[derive(Debug, Default)]
pub struct Helper {
    log: RefCell<Vec<String>>,
}

impl Helper {
    pub fn note(&self, s: &str) {
        self.log.borrow_mut().push(format!("   {}", s));
    }

    pub fn dump(&self) {
        for line in self.log.borrow().iter() {
            println!("{}", line);
        }
    }
}

fn sqr(input: i64) -> Result<i64, String> {
    if input >= 1000 {
        return Err("Input is too large!".to_string());
    }
    Ok(input * input)
}

/// Squares `input`, returning early or failing on bad input, and always cleans up.
fn square_small_num(input: i64) -> Result<i64, String> {
    let helper = Helper::default();
    defer! {
        println!("Performing final clean up");
        println!("Log follows:");
        helper.dump();
        println!("All done...");
        println!();
    }

    helper.note("Checking for a positive input");
    if input < 0 {
        helper.note("Invalid input, exiting");
        return Ok(-1);
    }

    helper.note("Calling some library function that might fail");
    let ret = sqr(input)?;

    helper.note("Got response, returning...");
    Ok(ret)
}

/// Same as `square_small_num` but the failure is a panic unwinding through the guard
fn square_or_panic(input: i64) -> i64 {
    defer!(println!("released after {}", input));
    match sqr(input) {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

async fn flush_later(name: &'static str) -> Result<(), defer_guard::ActionFailed<String>> {
    let flush = TryGuard::new(move || {
        tracing::info!(name, "flushing");
        if name.is_empty() {
            return Err("nothing to flush".to_string());
        }
        Ok(())
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    flush.finish()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    for input in [100, -1, 1000] {
        println!("{}:", input);
        match square_small_num(input) {
            Ok(v) => println!("result = {}", v),
            Err(e) => println!("Got an error: {}", e),
        }
    }

    let r = panic::catch_unwind(|| square_or_panic(1000));
    if let Err(payload) = r {
        if let Some(msg) = payload.downcast_ref::<String>() {
            println!("Got a panic: {}", msg);
        }
    }

    match flush_later("report").await {
        Ok(_) => println!("flushed"),
        Err(e) => println!("{}", e),
    }
    match flush_later("").await {
        Ok(_) => println!("flushed"),
        Err(e) => println!("{}", e),
    }
}
