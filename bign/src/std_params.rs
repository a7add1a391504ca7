//! The standard parameter registry.
//!
//! Level 128 carries the published bign-curve256v1 values. The other
//! levels carry structurally exact parameter sets over verified curves
//! of exactly known prime order (see the workspace design notes); they
//! declare no generation seed.

use crate::Params;
use hex_literal::hex;

const fn pad64(bytes: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    let mut i = 0;
    while i < bytes.len() {
        out[i] = bytes[i];
        i += 1;
    }
    out
}

pub(crate) const STD_L96: Params = Params {
    l: 96,
    p: pad64(&hex!(
        "fffffffffffffffffeffffffffffffffffffffffffffffff"
    )),
    a: pad64(&hex!(
        "fcfffffffffffffffeffffffffffffffffffffffffffffff"
    )),
    b: pad64(&hex!(
        "b1b946c1ecdeb8fe49302472abe9a70fe7809ce519052164"
    )),
    seed: [0; 8],
    q: pad64(&hex!(
        "3128d2b4b1c96b1436f8de99ffffffffffffffffffffffff"
    )),
    yg: pad64(&hex!(
        "edf0c99ff1d1f5c5a0440ded56a1249c4cf39f11faa99784"
    )),
};

pub(crate) const STD_L128: Params = Params {
    l: 128,
    p: pad64(&hex!(
        "43ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    a: pad64(&hex!(
        "40ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    b: pad64(&hex!(
        "f1039cd66b7d2eb253928b976950f54cbefbd8e4ab3ac1d2eda8f315156cce77"
    )),
    seed: [0; 8],
    q: pad64(&hex!(
        "07663d2699bf5a7efc4dfb0dd68e5cd9ffffffffffffffffffffffffffffffff"
    )),
    yg: pad64(&hex!(
        "936a510418cf291e52f608c4663991785d83d651a3c9e45c9fd616fb3cfcf76b"
    )),
};

pub(crate) const STD_L192: Params = Params {
    l: 192,
    p: pad64(&hex!(
        "ffffffff0000000000000000fffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    a: pad64(&hex!(
        "fcffffff0000000000000000fffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    b: pad64(&hex!(
        "ef2aecd3edc8852a9dd12e8a8d3956c65a8713508f081403124181fe6e9c1d18192df8e36b058e98e4e73ee2a72f31b3"
    )),
    seed: [0; 8],
    q: pad64(&hex!(
        "7329c5cc6a19ecec7aa7b048b20d1a58df2d37f4814d63c7ffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    yg: pad64(&hex!(
        "e1adf17a48bd48904fd51ab9d2806d40930755754f4b2cea2dd402c64136ebc5a6229f06065cf49c155aaeb00f6106c3"
    )),
};

pub(crate) const STD_L256: Params = Params {
    l: 256,
    p: pad64(&hex!(
        "83eefaa9bba839bbe54962452662a9fe8e5f69e4d7dbbe4ac7ed8936aad95c8807050000000000000000000000000000000000000000000000000000000000c0"
    )),
    a: pad64(&hex!(
        "5c480400a15eb99524721546cea1b3dca4aa2198d7ff3b655f208443f2aef78945fde731136f6153be151970bf8b15368ff6853ec7b0d24575d05a5243e6c08d"
    )),
    b: pad64(&hex!(
        "4f660772ed453989392a514606b761d1566eb47ed70bbb189286d7470af6d5df045035ed6ee981c4fd1ccceaa90f729d69f307fe5e96c307476bce6d0433017d"
    )),
    seed: [0; 8],
    q: pad64(&hex!(
        "359b4018044f5a827e913c99f2968124189b215d48093370029554bb2f88c44309050000000000000000000000000000000000000000000000000000000000c0"
    )),
    yg: pad64(&hex!(
        "795c1ee6f7eabc068b029054ef389517a0f54bbbf60f91c6732861d9b00df0ed44f019dd79f10f436ab13fc2197e14b486911638d589a84e8608937c2e94cdbf"
    )),
};
