// SPDX-License-Identifier: Apache-2.0
// This is the main entry point of the snp-report utility.

use std::{
    io::{self, Write},
    process,
};

use clap::Parser;
use log::debug;
use snp_report::{dump, firmware::GuestFirmware, Args};

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut firmware = GuestFirmware::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    // run() has already printed a report data decode failure to stdout.
    if let Err(e) = dump::run(&args, &mut firmware, &mut out) {
        debug!("exiting after fatal error: {:#}", e);
        let _ = out.flush();
        process::exit(1);
    }
}
