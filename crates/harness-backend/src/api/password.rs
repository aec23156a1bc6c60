use super::errors::ApiError;
use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::{pkcs8::DecodePublicKey, Oaep, RsaPublicKey};
use secrecy::{ExposeSecret, SecretString};

/// encrypts passwords for `setUserPassword`, which only accepts RSA-OAEP ciphertext
#[derive(Debug, Clone)]
pub struct PasswordEncryptor {
    key: RsaPublicKey,
}

impl PasswordEncryptor {
    /// parses a PEM encoded SubjectPublicKeyInfo RSA key
    pub fn from_pem(pem: &str) -> Result<Self, ApiError> {
        let key = RsaPublicKey::from_public_key_pem(pem.trim())
            .map_err(|error| ApiError::InvalidPublicKey(error.to_string()))?;
        Ok(Self { key })
    }

    /// returns the base64 encoded ciphertext of the password
    pub fn encrypt(&self, password: &SecretString) -> Result<String, ApiError> {
        let mut rng = rand::thread_rng();
        let ciphertext = self
            .key
            .encrypt(&mut rng, Oaep::new::<sha1::Sha1>(), password.expose_secret().as_bytes())
            .map_err(|error| ApiError::Encryption(error.to_string()))?;
        Ok(STANDARD.encode(ciphertext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::{pkcs8::EncodePublicKey, RsaPrivateKey};

    #[test]
    fn ciphertext_decrypts_to_the_password() {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let pem = RsaPublicKey::from(&private_key)
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .unwrap();

        let encryptor = PasswordEncryptor::from_pem(&pem).unwrap();
        let ciphertext = encryptor
            .encrypt(&SecretString::new("correct horse battery".to_owned()))
            .unwrap();

        let decrypted = private_key
            .decrypt(Oaep::new::<sha1::Sha1>(), &STANDARD.decode(ciphertext).unwrap())
            .unwrap();
        assert_eq!(decrypted, b"correct horse battery");
    }

    #[test]
    fn rejects_keys_that_are_not_pem() {
        assert!(matches!(
            PasswordEncryptor::from_pem("not a key"),
            Err(ApiError::InvalidPublicKey(_))
        ));
    }
}
