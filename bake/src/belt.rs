//! belt symmetric collaborators: ECB with tail stealing, a 64-bit MAC
//! and KRP key derivation.

use belt_block::BeltBlock;
use bign::{Error, Result};
use belt_hash::{BeltHash, Digest};
use cipher::{Block, BlockDecrypt, BlockEncrypt, KeyInit};
use cmac::{Cmac, Mac};

const BLOCK: usize = 16;

/// ECB encryption in place. Inputs shorter than one block are rejected;
/// a ragged tail borrows ciphertext from the preceding block.
pub(crate) fn ecb_encrypt(key: &[u8; 32], data: &mut [u8]) -> Result<()> {
    if data.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = BeltBlock::new_from_slice(key).map_err(|_| Error::BadInput)?;
    let n = data.len();
    let r = n % BLOCK;
    let full_end = n - r;

    for chunk in data[..full_end].chunks_exact_mut(BLOCK) {
        let block = Block::<BeltBlock>::from_mut_slice(chunk);
        cipher.encrypt_block(block);
    }

    if r != 0 {
        let last = full_end - BLOCK;
        // steal the tail of the last full ciphertext block
        let mut stolen = [0u8; BLOCK];
        stolen[..r].copy_from_slice(&data[full_end..]);
        stolen[r..].copy_from_slice(&data[last + r..full_end]);
        let head: [u8; BLOCK] = data[last..full_end]
            .try_into()
            .map_err(|_| Error::BadInput)?;
        data[full_end..].copy_from_slice(&head[..r]);
        let block = Block::<BeltBlock>::from_mut_slice(&mut stolen);
        cipher.encrypt_block(block);
        data[last..full_end].copy_from_slice(&stolen);
    }
    Ok(())
}

/// ECB decryption in place, inverting [`ecb_encrypt`].
pub(crate) fn ecb_decrypt(key: &[u8; 32], data: &mut [u8]) -> Result<()> {
    if data.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = BeltBlock::new_from_slice(key).map_err(|_| Error::BadInput)?;
    let n = data.len();
    let r = n % BLOCK;
    let full_end = n - r;
    let last = if r != 0 { full_end - BLOCK } else { full_end };

    for chunk in data[..last].chunks_exact_mut(BLOCK) {
        let block = Block::<BeltBlock>::from_mut_slice(chunk);
        cipher.decrypt_block(block);
    }

    if r != 0 {
        // recover the stolen block first
        let mut d: [u8; BLOCK] = data[last..full_end]
            .try_into()
            .map_err(|_| Error::BadInput)?;
        {
            let block = Block::<BeltBlock>::from_mut_slice(&mut d);
            cipher.decrypt_block(block);
        }
        let mut prev = [0u8; BLOCK];
        prev[..r].copy_from_slice(&data[full_end..]);
        prev[r..].copy_from_slice(&d[r..]);
        {
            let block = Block::<BeltBlock>::from_mut_slice(&mut prev);
            cipher.decrypt_block(block);
        }
        data[last..full_end].copy_from_slice(&prev);
        data[full_end..].copy_from_slice(&d[..r]);
    }
    Ok(())
}

/// 64-bit message authentication code over the belt block cipher.
pub(crate) fn mac(key: &[u8; 32], data: &[u8]) -> Result<[u8; 8]> {
    let mut m = Cmac::<BeltBlock>::new_from_slice(key).map_err(|_| Error::BadInput)?;
    m.update(data);
    let tag = m.finalize().into_bytes();
    let mut out = [0u8; 8];
    out.copy_from_slice(&tag[..8]);
    Ok(out)
}

/// Key repacking: derives a 256-bit key bound to a level and kind.
pub(crate) fn krp(key: &[u8; 32], level: &[u8; 16], kind: &[u8; 16]) -> [u8; 32] {
    let mut hasher = BeltHash::new();
    hasher.update(level);
    hasher.update(kind);
    hasher.update(key);
    hasher.finalize().into()
}
