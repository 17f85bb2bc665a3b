// SPDX-License-Identifier: Apache-2.0
// This file drives one snp-report invocation: decode the flags, query the provider step by step and print what came back.

use std::io::Write;

use anyhow::Result;
use log::{debug, warn};

use crate::{
    cli::{decode_report_data, Args},
    provider::AttestationProvider,
    report::{AttestationReport, REPORT_DATA_SIZE},
};

/// Root key selector of the first derived key request.
pub const FIRST_KEY_SELECTOR: u32 = 0;
/// Root key selector of the second derived key request.
pub const SECOND_KEY_SELECTOR: u32 = 1;

/// Run the whole fetch-and-print sequence against `provider`, writing to `out`.
///
/// Only a malformed `--report-data` or a failed write is an error. The decode
/// failure is written to `out` before it is returned, and nothing else is.
/// Provider failures are printed and the sequence goes on, rendering the
/// all-zero report if the parsed report could not be fetched.
pub fn run<P, W>(args: &Args, provider: &mut P, out: &mut W) -> Result<()>
where
    P: AttestationProvider + ?Sized,
    W: Write,
{
    let report_data = match decode_report_data(&args.report_data) {
        Ok(data) => data,
        Err(e) => {
            writeln!(out, "{:#}", e)?;
            return Err(e);
        }
    };
    debug!("using {} bytes of report data", report_data.len());

    if args.binary {
        debug!("fetching raw SNP report");
        match provider.fetch_raw_report(&report_data) {
            Ok(raw) => {
                debug!("fetched raw SNP report ({} bytes)", raw.len());
                writeln!(out, "{}", hex::encode(&raw))?;
            }
            Err(e) => {
                warn!("raw SNP report unavailable: {:#}", e);
                writeln!(out, "failed to fetch raw SNP report: {:#}", e)?;
            }
        }
    }

    debug!("fetching parsed SNP report");
    let report = match provider.fetch_parsed_report(&report_data) {
        Ok(report) => {
            debug!("fetched parsed SNP report");
            report
        }
        Err(e) => {
            warn!("SNP report unavailable: {:#}", e);
            writeln!(out, "failed to fetch SNP report: {:#}", e)?;
            AttestationReport::default()
        }
    };

    let mut custom_data = [0u8; REPORT_DATA_SIZE];
    debug!("fetching derived key {}", FIRST_KEY_SELECTOR);
    match provider.fetch_derived_key(FIRST_KEY_SELECTOR, &custom_data) {
        Ok(key) => writeln!(out, "Derived key: {}", hex::encode(key))?,
        Err(e) => writeln!(out, "failed to fetch derived key: {:#}", e)?,
    }

    custom_data[0] = 1;
    debug!("fetching derived key {}", SECOND_KEY_SELECTOR);
    match provider.fetch_derived_key(SECOND_KEY_SELECTOR, &custom_data) {
        Ok(key) => writeln!(
            out,
            "Derived key with customData[0] == 1: {}",
            hex::encode(key)
        )?,
        Err(e) => writeln!(out, "failed to fetch derived key: {:#}", e)?,
    }

    if args.verbose {
        writeln!(out, "{}", report.verbose())?;
    } else {
        writeln!(out, "{:?}", report)?;
    }

    Ok(())
}
