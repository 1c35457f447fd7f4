//! PDA derivation helpers for the journal program.
//!
//! An entry lives at the program address derived from `[title, owner]`, so a
//! title is unique per owner. The title is used verbatim as a seed, which caps
//! it at `MAX_SEED_LEN` bytes.

use anyhow::{anyhow, Result};
use solana_program::pubkey::{Pubkey, MAX_SEED_LEN};

#[derive(Debug, Clone)]
pub struct EntryPda {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derive the account address of `title` owned by `owner`.
pub fn derive_entry(program_id: &Pubkey, owner: &Pubkey, title: &str) -> Result<EntryPda> {
    if title.is_empty() {
        return Err(anyhow!("title must not be empty"));
    }
    if title.len() > MAX_SEED_LEN {
        return Err(anyhow!(
            "title is {} bytes, a seed can hold at most {MAX_SEED_LEN}",
            title.len()
        ));
    }
    let (address, bump) =
        Pubkey::try_find_program_address(&[title.as_bytes(), owner.as_ref()], program_id)
            .ok_or_else(|| anyhow!("no viable bump seed for entry `{title}`"))?;
    Ok(EntryPda { address, bump })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_stable_and_owner_scoped() {
        let program = crate::constants::default_program_id();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        let first = derive_entry(&program, &a, "Hello").unwrap();
        let again = derive_entry(&program, &a, "Hello").unwrap();
        assert_eq!(first.address, again.address);
        assert_eq!(first.bump, again.bump);

        let other_owner = derive_entry(&program, &b, "Hello").unwrap();
        assert_ne!(first.address, other_owner.address);

        let other_title = derive_entry(&program, &a, "World").unwrap();
        assert_ne!(first.address, other_title.address);
    }

    #[test]
    fn derivation_matches_find_program_address() {
        let program = crate::constants::default_program_id();
        let owner = Pubkey::new_unique();
        let pda = derive_entry(&program, &owner, "Hello").unwrap();
        let (expected, bump) = Pubkey::find_program_address(&[b"Hello", owner.as_ref()], &program);
        assert_eq!(pda.address, expected);
        assert_eq!(pda.bump, bump);
    }

    #[test]
    fn oversized_title_is_rejected() {
        let program = crate::constants::default_program_id();
        let owner = Pubkey::new_unique();
        assert!(derive_entry(&program, &owner, &"x".repeat(33)).is_err());
        assert!(derive_entry(&program, &owner, &"x".repeat(32)).is_ok());
        assert!(derive_entry(&program, &owner, "").is_err());
    }
}
