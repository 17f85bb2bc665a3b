// SPDX-License-Identifier: Apache-2.0
// This file contains the attestation provider backed by the SEV-SNP guest device (/dev/sev-guest).

#[cfg(target_os = "linux")]
use anyhow::{anyhow, Context, Result};
#[cfg(target_os = "linux")]
use sev::firmware::guest::{DerivedKey, Firmware, GuestFieldSelect};

#[cfg(target_os = "linux")]
use crate::{provider::AttestationProvider, report::pad_report_data, report::REPORT_DATA_SIZE};

#[cfg(target_os = "linux")]
pub use linux::GuestFirmware;
#[cfg(not(target_os = "linux"))]
pub use unsupported::GuestFirmware;

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    // Root key choices for a derived key request.
    const ROOT_KEY_VCEK: u32 = 0;
    const ROOT_KEY_VMRK: u32 = 1;

    /// Talks to `/dev/sev-guest`. The device is opened for every request and
    /// the driver picks the VMPL of the report.
    #[derive(Debug, Default)]
    pub struct GuestFirmware;

    impl GuestFirmware {
        pub fn new() -> Self {
            GuestFirmware
        }

        fn open(&self) -> Result<Firmware> {
            Firmware::open().context("unable to open /dev/sev-guest")
        }
    }

    impl AttestationProvider for GuestFirmware {
        fn fetch_raw_report(&mut self, report_data: &[u8]) -> Result<Vec<u8>> {
            let data = pad_report_data(report_data)?;
            let mut fw = self.open()?;
            let report = fw
                .get_report(None, Some(data), None)
                .context("unable to fetch attestation report")?;

            bincode::serialize(&report).context("Could not serialize attestation report.")
        }

        fn fetch_derived_key(
            &mut self,
            selector: u32,
            _custom_data: &[u8; REPORT_DATA_SIZE],
        ) -> Result<Vec<u8>> {
            let root_key_select = match selector {
                ROOT_KEY_VCEK => false,
                ROOT_KEY_VMRK => true,
                other => {
                    return Err(anyhow!(
                        "unknown root key selector {} (expected {} or {})",
                        other,
                        ROOT_KEY_VCEK,
                        ROOT_KEY_VMRK
                    ))
                }
            };

            // MSG_KEY_REQ has no guest payload field, the custom data never leaves the guest.
            let request = DerivedKey::new(root_key_select, GuestFieldSelect(0), 0, 0, 0);
            let mut fw = self.open()?;
            let key = fw
                .get_derived_key(None, request)
                .context("unable to fetch derived key")?;

            Ok(key.to_vec())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn long_report_data_rejected_before_device_open() {
            let err = GuestFirmware.fetch_raw_report(&[0u8; 65]).unwrap_err();
            assert!(err.to_string().contains("at most 64 bytes"));
        }

        #[test]
        fn unknown_root_key_selector() {
            let err = GuestFirmware::new()
                .fetch_derived_key(2, &[0u8; REPORT_DATA_SIZE])
                .unwrap_err();
            assert!(err.to_string().contains("unknown root key selector 2"));
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod unsupported {
    use anyhow::{anyhow, Result};

    use crate::provider::AttestationProvider;

    /// Stand-in for targets without the SEV-SNP guest driver. Every request fails.
    #[derive(Debug, Default)]
    pub struct GuestFirmware;

    impl GuestFirmware {
        pub fn new() -> Self {
            GuestFirmware
        }
    }

    impl AttestationProvider for GuestFirmware {
        fn fetch_raw_report(&mut self, _report_data: &[u8]) -> Result<Vec<u8>> {
            Err(anyhow!("SEV-SNP guest device is only available on Linux"))
        }

        fn fetch_derived_key(&mut self, _selector: u32, _custom_data: &[u8; 64]) -> Result<Vec<u8>> {
            Err(anyhow!("SEV-SNP guest device is only available on Linux"))
        }
    }
}
