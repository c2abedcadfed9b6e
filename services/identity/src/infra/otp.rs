use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, Script};
use rand::RngExt;

use crate::domain::repository::OtpStore;
use crate::domain::types::OTP_LEN;
use crate::error::IdentityError;

/// Charset for one-time passcodes (digits, as dictated over email).
const CHARSET: &[u8] = b"0123456789";

/// Upsert for `issue`: replace any outstanding code for the email (dropping
/// its reverse-index key) and write both keys with the TTL, in one engine
/// step. KEYS[1] = email key, KEYS[2] = new code key.
/// ARGV[1] = code, ARGV[2] = email, ARGV[3] = TTL seconds.
const ISSUE_SCRIPT: &str = r#"
local prev = redis.call('GET', KEYS[1])
if prev then
  redis.call('DEL', 'reset_otp:code:' .. prev)
end
redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[3])
redis.call('SET', KEYS[2], ARGV[2], 'EX', ARGV[3])
return 1
"#;

/// Compare-and-delete for `verify_and_consume`. The find and the delete are
/// one script invocation, so two callers racing on the same code cannot
/// both see a match. KEYS[1] = email key, KEYS[2] = code key.
/// ARGV[1] = code.
const CONSUME_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  redis.call('DEL', KEYS[1], KEYS[2])
  return 1
end
return 0
"#;

/// Redis-backed store for reset passcodes.
///
/// One record per email, held as a key pair: `reset_otp:email:{email}` →
/// code and `reset_otp:code:{code}` → email (reverse index for
/// `lookup_owner`). Both keys carry the TTL, so expiry happens inside the
/// engine with no application sweep.
#[derive(Clone)]
pub struct RedisOtpStore {
    pub pool: Pool,
    pub ttl_secs: u64,
}

fn email_key(email: &str) -> String {
    format!("reset_otp:email:{email}")
}

fn code_key(code: &str) -> String {
    format!("reset_otp:code:{code}")
}

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

impl OtpStore for RedisOtpStore {
    async fn issue(&self, email: &str) -> Result<String, IdentityError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        let code = generate_code();
        let _: i64 = Script::new(ISSUE_SCRIPT)
            .key(email_key(email))
            .key(code_key(&code))
            .arg(&code)
            .arg(email)
            .arg(self.ttl_secs)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        Ok(code)
    }

    async fn lookup_owner(&self, code: &str) -> Result<Option<String>, IdentityError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        let owner: Option<String> = conn
            .get(code_key(code))
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        Ok(owner)
    }

    async fn verify_and_consume(&self, email: &str, code: &str) -> Result<bool, IdentityError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        let consumed: i64 = Script::new(CONSUME_SCRIPT)
            .key(email_key(email))
            .key(code_key(code))
            .arg(code)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| IdentityError::Internal(e.into()))?;
        Ok(consumed == 1)
    }
}
