// SPDX-License-Identifier: Apache-2.0
// This file defines the command-line flags of snp-report and the decoding of the custom report data.

use anyhow::{Context, Result};
use clap::Parser;

/// Fetch the SEV-SNP attestation report and derived keys of this guest and print them.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "snp-report", version)]
pub struct Args {
    /// Report data to use when fetching SNP attestation report, hex encoded.
    #[arg(long, value_name = "hex", default_value_t = String::new())]
    pub report_data: String,

    /// Also fetch the report in binary format and print it as hex.
    #[arg(long, default_value_t = false)]
    pub binary: bool,

    /// Print the report as a field table instead of a structure dump.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

/// Decode the `--report-data` flag. An empty flag means no custom data.
pub fn decode_report_data(report_data: &str) -> Result<Vec<u8>> {
    if report_data.is_empty() {
        return Ok(Vec::new());
    }

    hex::decode(report_data).context("failed to decode report data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["snp-report"]).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn parse_all_flags() {
        let args =
            Args::try_parse_from(["snp-report", "--report-data", "00ff", "--binary", "--verbose"])
                .unwrap();
        assert_eq!(args.report_data, "00ff");
        assert!(args.binary);
        assert!(args.verbose);
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["snp-report", "--json"]).is_err());
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode_report_data("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_is_case_insensitive() {
        for s in ["deadbeef", "DEADBEEF", "DeAdBeEf", "00", "0123456789abcdef"] {
            let bytes = decode_report_data(s).unwrap();
            assert_eq!(hex::encode(&bytes), s.to_lowercase());
        }
    }

    #[test]
    fn decode_malformed() {
        let err = decode_report_data("zz").unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.starts_with("failed to decode report data"));
        assert!(msg.contains("Invalid character"));

        assert!(decode_report_data("abc").is_err());
    }

    proptest! {
        #[test]
        fn decode_then_encode_any_hex(s in "([0-9a-fA-F]{2}){0,64}") {
            let bytes = decode_report_data(&s).unwrap();
            prop_assert_eq!(bytes.len(), s.len() / 2);
            prop_assert_eq!(hex::encode(&bytes), s.to_lowercase());
        }

        #[test]
        fn decode_rejects_non_hex_pair(prefix in "([0-9a-f]{2}){0,8}", bad in "[g-zG-Z]") {
            let s = format!("{}{}0", prefix, bad);
            prop_assert!(decode_report_data(&s).is_err());
        }
    }
}
