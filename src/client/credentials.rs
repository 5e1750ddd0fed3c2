use openssl::pkey::PKey;
use openssl::x509::X509;

use crate::core::error::VerifactuError;

fn cert_error(message: impl Into<String>) -> VerifactuError {
    VerifactuError::CertificateError(message.into())
}

/// The three ways AEAT-issued mTLS credentials are commonly distributed.
pub enum Credentials {
    /// A single PEM blob containing both the certificate chain and an
    /// unencrypted private key, ready to hand to the TLS backend as-is.
    CombinedPem(Vec<u8>),
    /// A PEM blob whose private key is encrypted, decrypted in memory with
    /// the supplied passphrase before use.
    EncryptedPem { pem: Vec<u8>, passphrase: String },
    /// A PKCS#12 bundle (`.p12`/`.pfx`), as issued by the FNMT and most
    /// Spanish certification authorities.
    Pkcs12 { der: Vec<u8>, passphrase: String },
}

impl Credentials {
    pub fn combined_pem(pem: Vec<u8>) -> Self {
        Self::CombinedPem(pem)
    }

    pub fn encrypted_pem(pem: Vec<u8>, passphrase: impl Into<String>) -> Self {
        Self::EncryptedPem {
            pem,
            passphrase: passphrase.into(),
        }
    }

    pub fn pkcs12(der: Vec<u8>, passphrase: impl Into<String>) -> Self {
        Self::Pkcs12 {
            der,
            passphrase: passphrase.into(),
        }
    }

    /// Build a `reqwest::Identity` ready to be set on the blocking client.
    /// `reqwest`'s native-tls backend has no combined-PEM identity
    /// constructor — only `from_pkcs8_pem(cert, key)`, taking the
    /// certificate and key as separate PEM buffers, and
    /// `from_pkcs12_der`. Both PEM-based credential forms are therefore
    /// split (and, for `EncryptedPem`, decrypted) with `openssl` before
    /// being handed to `reqwest`.
    pub fn into_identity(self) -> Result<reqwest::Identity, VerifactuError> {
        match self {
            Self::CombinedPem(pem) => {
                let cert = X509::from_pem(&pem).map_err(|e| cert_error(format!("could not read certificate: {e}")))?;
                let key = PKey::private_key_from_pem(&pem)
                    .map_err(|e| cert_error(format!("could not read private key: {e}")))?;

                let cert_pem = cert
                    .to_pem()
                    .map_err(|e| cert_error(format!("could not re-encode certificate: {e}")))?;
                let key_pem = key
                    .private_key_to_pem_pkcs8()
                    .map_err(|e| cert_error(format!("could not re-encode private key: {e}")))?;

                reqwest::Identity::from_pkcs8_pem(&cert_pem, &key_pem)
                    .map_err(|e| cert_error(format!("invalid combined PEM identity: {e}")))
            }
            Self::EncryptedPem { pem, passphrase } => {
                let key = PKey::private_key_from_pem_passphrase(&pem, passphrase.as_bytes())
                    .map_err(|e| cert_error(format!("could not decrypt private key: {e}")))?;
                let cert = X509::from_pem(&pem).map_err(|e| cert_error(format!("could not read certificate: {e}")))?;

                let cert_pem = cert
                    .to_pem()
                    .map_err(|e| cert_error(format!("could not re-encode certificate: {e}")))?;
                let key_pem = key
                    .private_key_to_pem_pkcs8()
                    .map_err(|e| cert_error(format!("could not re-encode private key: {e}")))?;

                reqwest::Identity::from_pkcs8_pem(&cert_pem, &key_pem)
                    .map_err(|e| cert_error(format!("invalid decrypted PEM identity: {e}")))
            }
            Self::Pkcs12 { der, passphrase } => reqwest::Identity::from_pkcs12_der(&der, &passphrase)
                .map_err(|e| cert_error(format!("invalid PKCS#12 bundle: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_combined_pem_is_rejected() {
        let err = Credentials::combined_pem(b"not a pem".to_vec()).into_identity().unwrap_err();
        assert!(matches!(err, VerifactuError::CertificateError(_)));
    }

    #[test]
    fn malformed_pkcs12_is_rejected() {
        let err = Credentials::pkcs12(b"not a bundle".to_vec(), "secret")
            .into_identity()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::CertificateError(_)));
    }
}
