//! Ground-truth vectors shared by the kernel unit tests.

use crate::word::Word;

pub const VA: [Word; 4] = [0x061a5a2ee45eebf7, 0xcc3e1ffa971f24b0, 0xf1023ccf63244e63, 0xbaad74c132fb35fd];
pub const VB: [Word; 4] = [0x2150bad7b02236fb, 0xcd4b303bb40445bc, 0x8aee0e842f52dc68, 0xe21a4e271b8ebff7];
pub const VA_PLUS_VB: [Word; 4] = [0x276b1506948122f2, 0x998950364b236a6c, 0x7bf04b5392772acc, 0x9cc7c2e84e89f5f5];
pub const VA_MINUS_VB: [Word; 4] = [0xe4c99f57343cb4fc, 0xfef2efbee31adef3, 0x66142e4b33d171fa, 0xd893269a176c7606];
pub const VA_TIMES_VB: [Word; 8] = [0x1971896c15a5752d, 0xe7e3935ec7c34d27, 0x533fffcb29dc8b5a, 0x47dbeec84803d726, 0x02088fd100c8386e, 0x811dcc9679d18661, 0x0998b74b92d2e6f4, 0xa4e04fadc8b8fda8];
pub const VA_SQUARED: [Word; 8] = [0x1debb0461ae36851, 0xf0b0696be0b3c321, 0x530a58ea27c0f57f, 0x990adacd042c0154, 0x1967aafa78f15d6b, 0xcb5ad54ccafda2fb, 0x8d4ba04d1656ff5c, 0x8820832fc07399fd];
// DIVIDEND = VA * VB + 12345
pub const DIVIDEND: [Word; 8] = [0x1971896c15a5a566, 0xe7e3935ec7c34d27, 0x533fffcb29dc8b5a, 0x47dbeec84803d726, 0x02088fd100c8386e, 0x811dcc9679d18661, 0x0998b74b92d2e6f4, 0xa4e04fadc8b8fda8];
pub const QUOT: [Word; 8] = [0x061a5a2ee45eebf7, 0xcc3e1ffa971f24b0, 0xf1023ccf63244e63, 0xbaad74c132fb35fd, 0, 0, 0, 0];
pub const REM: [Word; 4] = [0x3039, 0, 0, 0];
pub const VA_ISQRT: [Word; 2] = [0x05562b0164ab7317, 0xda9ba5a646b84197];

pub const AM: [Word; 4] = VA;
pub const BM: [Word; 4] = VB;
// p = 2^256 - 189, q = the bign-curve256v1 group order; both odd primes
pub const P256: [Word; 4] = [0xffffffffffffff43, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff];
pub const Q256: [Word; 4] = [0x7e5abf99263d6607, 0xd95c8ed60dfb4dfc, 0xffffffffffffffff, 0xffffffffffffffff];
pub const ADDM: [Word; 4] = [0x276b1506948123af, 0x998950364b236a6c, 0x7bf04b5392772acc, 0x9cc7c2e84e89f5f5];
pub const SUBM: [Word; 4] = [0xe4c99f57343cb43f, 0xfef2efbee31adef3, 0x66142e4b33d171fa, 0xd893269a176c7606];
pub const MULM: [Word; 4] = [0x99c3b6b9a9777875, 0x3ae39e76b77382c5, 0x68ff52968f910dde, 0x0176c21578971c35];
pub const INVM: [Word; 4] = [0x18fdf78af848f495, 0xad765be86932628b, 0x914cdc71966f2fa3, 0x9e28644632071f7e];
pub const HALFM: [Word; 4] = [0x030d2d17722f759d, 0xe61f0ffd4b8f9258, 0xf8811e67b1922731, 0xdd56ba60997d9afe];
pub const POWM: [Word; 4] = [0xd7a0219ca4e34150, 0xc516df227d14d931, 0x6de248960d25a113, 0x69a203e33dd05f07];
pub const POWQ: [Word; 4] = [0x3c34305bcbedc4ac, 0xa9cc4ca513f04fbe, 0x075a00d5e039f793, 0x18e76996cd24a056];

// jacobi(3, q), (am, p), (bm, p), (am, q), (5, 21), (1001, 9907)
pub const JACOBI_CASES: [i32; 6] = [-1, -1, 1, -1, 1, -1];

// floor(2^512 / q)
pub const MU_Q: [Word; 5] = [0x81a54066d9c299f9, 0x26a37129f204b203, 0, 0, 0x0000000000000001];
