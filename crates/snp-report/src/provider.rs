// SPDX-License-Identifier: Apache-2.0
// This file defines the attestation capability the printer depends on. Hardware access and test doubles both plug in here.

use anyhow::Result;

use crate::report::AttestationReport;

/// Source of attestation reports and derived keys.
pub trait AttestationProvider {
    /// Request a report binding `report_data` and return it in its raw firmware layout.
    fn fetch_raw_report(&mut self, report_data: &[u8]) -> Result<Vec<u8>>;

    /// Request a report binding `report_data` and decode it.
    fn fetch_parsed_report(&mut self, report_data: &[u8]) -> Result<AttestationReport> {
        let raw = self.fetch_raw_report(report_data)?;
        AttestationReport::from_bytes(&raw)
    }

    /// Request a key derived from the root key chosen by `selector`.
    fn fetch_derived_key(&mut self, selector: u32, custom_data: &[u8; 64]) -> Result<Vec<u8>>;
}
