//! Forward and inverse number-theoretic transform over `Z_q[x]/(x^256 + 1)`.
//!
//! The twiddle factors are fixed domain parameters: `ZETAS[k]` is consumed in
//! order by the forward Cooley-Tukey network (layers 128 down to 1) and
//! `INV_ZETAS[k]` by the inverse Gentleman-Sande network (layers 1 up to 128).
//! Only the first 255 entries of each table are used.

use crate::field::{add, mul, sub};
use crate::N;

/// `2^{-1} mod Q`, applied to both butterfly outputs at every inverse layer.
pub(crate) const INV2: u32 = 3_670_017;

pub(crate) const ZETAS: [u32; N] = [
    2306278, 2001861, 3926523, 5712452, 1922517, 5680261, 4961214, 7026628,
    3353052, 3414003, 1291800, 3770003, 2188519, 44983, 6616885, 4899906,
    6763860, 4225186, 1867700, 3327345, 5611433, 422436, 4933085, 4644231,
    3347232, 6255134, 6433184, 6608651, 6067369, 5960674, 7006497, 7301085,
    2408310, 4688331, 6709784, 2499800, 4824550, 1129225, 4345886, 23061,
    6537873, 3448984, 2899815, 3283321, 1365217, 2270003, 1461683, 6659145,
    2305123, 995532, 3887463, 2189588, 2730124, 3316658, 6249261, 4264264,
    5674210, 5416304, 7056089, 6538096, 474623, 1572805, 6041751, 2189605,
    5236685, 648130, 6939855, 2686787, 7210120, 3449131, 4281163, 1210211,
    6096276, 890592, 5982252, 3446058, 220714, 6438921, 5462319, 5841360,
    6250342, 697835, 3852451, 1293585, 2873747, 6379252, 3099021, 2899895,
    4892464, 5985126, 6642614, 3375797, 4730697, 3395546, 6510154, 3107887,
    6429624, 6346280, 3242685, 1870405, 2568787, 529778, 793137, 2393898,
    4969869, 2218742, 5256656, 2776454, 6149804, 3812403, 4456093, 2373588,
    1214262, 864619, 7033071, 6777965, 1465061, 1010154, 6172777, 3317344,
    2908841, 3420599, 4953112, 1469573, 5661643, 2988986, 3961993, 3483618,
    4292961, 5040029, 2383130, 4083089, 4476118, 3960225, 569858, 2569262,
    7286761, 4812855, 200265, 845175, 4025236, 1223977, 1336466, 7197748,
    2090101, 2528213, 1286740, 2321435, 3018499, 2437278, 6659719, 2129950,
    5801147, 1967085, 5343386, 2074818, 134077, 102621, 530586, 556141,
    3706712, 2793060, 3910078, 1004606, 4619952, 610162, 1430408, 6393546,
    4948550, 6026247, 2533859, 2172105, 873119, 2058139, 2836268, 7331298,
    3052255, 5042804, 1795804, 6616147, 809509, 1543245, 6690575, 7100399,
    5162483, 1237874, 5097754, 3751866, 4072500, 3435277, 4269400, 7117389,
    389516, 6483375, 3163587, 1054987, 4489480, 4315783, 2356288, 3389122,
    3166876, 4513449, 333872, 925783, 126436, 3949993, 939457, 7093293,
    7044704, 997562, 2690749, 1450444, 2468111, 2342078, 4061215, 2302045,
    7109148, 446992, 2201025, 6521936, 3709717, 6364509, 675323, 2959539,
    979043, 4665799, 1747495, 7211091, 5339119, 2979449, 7067608, 3629816,
    5768117, 3978698, 2891820, 4185845, 732815, 2764316, 93269, 1926323,
    642181, 5089926, 1699122, 4341089, 4424973, 2676180, 1509330, 5794468,
    968555, 1113860, 6063740, 158703, 2491889, 2697944, 4198068, 3483618,
];

pub(crate) const INV_ZETAS: [u32; N] = [
    3141965, 4642089, 4848144, 7181330, 1276293, 6226173, 6371478, 1545565,
    5830703, 4663853, 2915060, 2998944, 5640911, 2250107, 6697852, 5413710,
    7246764, 4575717, 6607218, 3154188, 4448213, 3361335, 1571916, 3710217,
    272425, 4360584, 2000914, 128942, 5592538, 2674234, 6360990, 4380494,
    6664710, 975524, 3630316, 818097, 5139008, 6893041, 230885, 5037988,
    3278818, 4997955, 4871922, 5889589, 4649284, 6342471, 295329, 246740,
    6400576, 3390040, 7213597, 6414250, 7006161, 2826584, 4173157, 3950911,
    4983745, 3024250, 2850553, 6285046, 4176446, 856658, 6950517, 222644,
    3070633, 3904756, 3267533, 3588167, 2242279, 6102159, 2177550, 239634,
    649458, 5796788, 6530524, 723886, 5544229, 2297229, 4287778, 8735,
    4503765, 5281894, 6466914, 5167928, 4806174, 1313786, 2391483, 946487,
    5909625, 6729871, 2720081, 6335427, 3429955, 4546973, 3633321, 6783892,
    6809447, 7237412, 7205956, 5265215, 1996647, 5372948, 1538886, 5210083,
    680314, 4902755, 4321534, 5018598, 6053293, 4811820, 5249932, 142285,
    6003567, 6116056, 3314797, 6494858, 7139768, 2527178, 53272, 4770771,
    6770175, 3379808, 2863915, 3256944, 4956903, 2300004, 3047072, 3856415,
    3378040, 4351047, 1678390, 5870460, 2386921, 3919434, 4431192, 4022689,
    1167256, 6329879, 5874972, 562068, 306962, 6475414, 6125771, 4966445,
    2883940, 3527630, 1190229, 4563579, 2083377, 5121291, 2370164, 4946135,
    6546896, 6810255, 4771246, 5469628, 4097348, 993753, 910409, 4232146,
    829879, 3944487, 2609336, 3964236, 697419, 1354907, 2447569, 4440138,
    4241012, 960781, 4466286, 6046448, 3487582, 6642198, 1089691, 1498673,
    1877714, 901112, 7119319, 3893975, 1357781, 6449441, 1243757, 6129822,
    3058870, 3890902, 129913, 4653246, 400178, 6691903, 2103348, 5150428,
    1298282, 5767228, 6865410, 801937, 283944, 1923729, 1665823, 3075769,
    1090772, 4023375, 4609909, 5150445, 3452570, 6344501, 5034910, 680888,
    5878350, 5070030, 5974816, 4056712, 4440218, 3891049, 802160, 7316972,
    2994147, 6210808, 2515483, 4840233, 630249, 2651702, 4931723, 38948,
    333536, 1379359, 1272664, 731382, 906849, 1084899, 3992801, 2695802,
    2406948, 6917597, 1728600, 4012688, 5472333, 3114847, 576173, 2440127,
    723148, 7295050, 5151514, 3570030, 6048233, 3926030, 3986981, 313405,
    2378819, 1659772, 5417516, 1627581, 3413510, 5338172, 5033755, 7340032,
];

pub(crate) fn ntt(cs: &mut [u32; N]) {
    let mut layer = N / 2;
    let mut zi = 0;
    while layer >= 1 {
        let mut offset = 0;
        while offset < N - layer {
            let z = ZETAS[zi];
            zi += 1;
            for j in offset..offset + layer {
                let t = mul(z, cs[j + layer]);
                cs[j + layer] = sub(cs[j], t);
                cs[j] = add(cs[j], t);
            }
            offset += 2 * layer;
        }
        layer /= 2;
    }
}

pub(crate) fn inv_ntt(cs: &mut [u32; N]) {
    let mut layer = 1;
    let mut zi = 0;
    while layer < N {
        let mut offset = 0;
        while offset < N - layer {
            let z = INV_ZETAS[zi];
            zi += 1;
            for j in offset..offset + layer {
                let t = sub(cs[j], cs[j + layer]);
                cs[j] = mul(add(cs[j], cs[j + layer]), INV2);
                cs[j + layer] = mul(mul(INV2, z), t);
            }
            offset += 2 * layer;
        }
        layer *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::inverse;
    use crate::Q;

    #[test]
    fn test_inv2() {
        assert_eq!(INV2, inverse(2));
    }

    #[test]
    fn test_constant_polynomial() {
        let mut cs = [0u32; N];
        cs[0] = 1;
        ntt(&mut cs);
        assert!(cs.iter().all(|&c| c == 1));

        inv_ntt(&mut cs);
        assert_eq!(cs[0], 1);
        assert!(cs[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_pinned_monomial() {
        let mut cs = [0u32; N];
        cs[1] = 1;
        ntt(&mut cs);
        assert_eq!(&cs[..4], &[3483618, 3856415, 4292961, 3047072]);
    }

    #[test]
    fn test_last_twiddles() {
        // The trailing entry of each table is never consumed by a 256-point transform.
        assert_eq!(INV_ZETAS[N - 1], Q - 1);
        assert!(ZETAS.iter().chain(INV_ZETAS.iter()).all(|&z| z < Q));
    }
}
