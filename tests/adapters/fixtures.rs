use ed25519_dalek::{Signer, SigningKey};
use pinwheel::interaction::{Headers, SignatureVerifier};
use pinwheel::interaction::headers::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use serde_json::{Value, json};

pub const INTERACTION_ID: &str = "1100000000000000001";
pub const GUILD_ID: &str = "1400000000000000001";
pub const CHANNEL_ID: &str = "1500000000000000001";
pub const TARGET_MESSAGE_ID: &str = "1300000000000000001";
pub const TIMESTAMP: &str = "1700000000";

/// Signs request bodies the way Discord does, with a fixed test key
pub struct TestSigner {
    key: SigningKey,
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSigner {
    pub fn new() -> Self {
        Self {
            key: SigningKey::from_bytes(&[42u8; 32]),
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.verifying_key().as_bytes())
    }

    pub fn verifier(&self) -> SignatureVerifier {
        SignatureVerifier::from_hex(&self.public_key_hex()).unwrap()
    }

    pub fn signature(&self, body: &str) -> String {
        let message = format!("{TIMESTAMP}{body}");
        hex::encode(self.key.sign(message.as_bytes()).to_bytes())
    }

    /// Signature headers for `body`
    pub fn headers(&self, body: &str) -> Headers {
        [
            (SIGNATURE_HEADER, self.signature(body)),
            (TIMESTAMP_HEADER, TIMESTAMP.to_string()),
        ]
        .into_iter()
        .collect()
    }
}

/// A guild application command invocation
///
/// * `name` - Command name
/// * `command_type` - 1 chat input, 2 user, 3 message context menu
pub fn command_interaction(name: &str, command_type: u8) -> Value {
    json!({
        "id": INTERACTION_ID,
        "application_id": "1000000000000000001",
        "type": 2,
        "token": "interaction-token",
        "version": 1,
        "data": {
            "id": "1200000000000000001",
            "name": name,
            "type": command_type,
            "target_id": TARGET_MESSAGE_ID
        },
        "guild_id": GUILD_ID,
        "channel_id": CHANNEL_ID,
        "member": {
            "user": {
                "id": "1600000000000000001",
                "username": "alice",
                "discriminator": "0"
            },
            "roles": []
        }
    })
}

/// A guild interaction of any type
pub fn interaction_of_type(interaction_type: u64) -> Value {
    let mut value = command_interaction("help", 1);
    value["type"] = json!(interaction_type);
    value
}

pub fn ping_interaction() -> Value {
    json!({
        "id": INTERACTION_ID,
        "application_id": "1000000000000000001",
        "type": 1,
        "token": "interaction-token",
        "version": 1
    })
}
