//! Geometry of the FBI WSQ decomposition: the 20-node wavelet tree and the
//! 64-entry subband (quantization) tree.

pub const WAVELET_NODES: usize = 20;
pub const SUBBANDS: usize = 64;
/// Subbands 60..64 are never coded.
pub const CODED_SUBBANDS: usize = 60;

const INVERTED_ROWS: [usize; 8] = [2, 4, 7, 9, 11, 13, 16, 18];
const INVERTED_COLUMNS: [usize; 8] = [3, 5, 8, 9, 12, 13, 17, 18];

/// A region synthesized from its four quarters. `inv_rw` / `inv_cl` mean the
/// highpass half comes first horizontally / vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveletNode {
    pub x: usize,
    pub y: usize,
    pub lenx: usize,
    pub leny: usize,
    pub inv_rw: bool,
    pub inv_cl: bool,
}

impl WaveletNode {
    fn place(&mut self, x: usize, y: usize, lenx: usize, leny: usize) {
        self.x = x;
        self.y = y;
        self.lenx = lenx;
        self.leny = leny;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subband {
    pub x: usize,
    pub y: usize,
    pub lenx: usize,
    pub leny: usize,
}

/// Splits `len` in two. Odd lengths give the larger half first unless
/// `inverted`.
pub fn halves(len: usize, inverted: bool) -> (usize, usize) {
    if len % 2 == 0 {
        (len / 2, len / 2)
    } else if inverted {
        (len / 2, len / 2 + 1)
    } else {
        (len / 2 + 1, len / 2)
    }
}

pub type WaveletTree = [WaveletNode; WAVELET_NODES];
pub type SubbandTree = [Subband; SUBBANDS];

#[allow(clippy::too_many_arguments)]
fn split_node(
    tree: &mut WaveletTree,
    parent: usize,
    first_child: usize,
    lenx: usize,
    leny: usize,
    x: usize,
    y: usize,
    skip_last: bool,
) {
    tree[parent].place(x, y, lenx, leny);
    let (ax, bx) = halves(lenx, parent == 4);
    let (ay, by) = halves(leny, parent == 5);

    tree[first_child].place(x, y, ax, ay);
    tree[first_child + 1].place(x + ax, y, bx, ay);
    tree[first_child + 2].place(x, y + ay, ax, by);
    if !skip_last {
        tree[first_child + 3].place(x + ax, y + ay, bx, by);
    }
}

pub fn wavelet_tree(width: usize, height: usize) -> WaveletTree {
    let mut tree = [WaveletNode::default(); WAVELET_NODES];
    for node in INVERTED_ROWS {
        tree[node].inv_rw = true;
    }
    for node in INVERTED_COLUMNS {
        tree[node].inv_cl = true;
    }

    split_node(&mut tree, 0, 1, width, height, 0, 0, true);

    let (lenx, lenx2) = halves(tree[1].lenx, false);
    let (leny, leny2) = halves(tree[1].leny, false);

    split_node(&mut tree, 4, 6, lenx2, leny, lenx, 0, false);
    split_node(&mut tree, 5, 10, lenx, leny2, 0, leny, false);
    split_node(&mut tree, 14, 15, lenx, leny, 0, 0, false);

    let (root_x, _) = halves(tree[15].lenx, false);
    let (root_y, _) = halves(tree[15].leny, false);
    tree[19].place(0, 0, root_x, root_y);

    tree
}

/// Splits a wavelet region into 16 subbands, row-major by quadrant.
fn split_sixteen(bands: &mut SubbandTree, start: usize, region: &WaveletNode, rw: bool, cl: bool) {
    let (left, right) = halves(region.lenx, cl);
    let (top, bottom) = halves(region.leny, rw);

    let (c0, c1) = halves(left, false);
    let (d0, d1) = halves(right, true);
    let (r0, r1) = halves(top, false);
    let (s0, s1) = halves(bottom, true);

    let x0 = region.x;
    let x1 = x0 + c0;
    let x2 = x0 + left;
    let x3 = x2 + d0;
    let y0 = region.y;
    let y1 = y0 + r0;
    let y2 = y0 + top;
    let y3 = y2 + s0;

    let quadrants = [
        [(x0, c0), (x1, c1)],
        [(x2, d0), (x3, d1)],
    ];
    let rows = [[(y0, r0), (y1, r1)], [(y2, s0), (y3, s1)]];

    let mut band = start;
    for vertical in rows {
        for columns in quadrants {
            for (y, leny) in vertical {
                for (x, lenx) in columns {
                    bands[band] = Subband { x, y, lenx, leny };
                    band += 1;
                }
            }
        }
    }
}

fn split_four(bands: &mut SubbandTree, start: usize, region: &WaveletNode) {
    let (a0, a1) = halves(region.lenx, false);
    let (b0, b1) = halves(region.leny, false);
    let (x, y) = (region.x, region.y);

    bands[start] = Subband { x, y, lenx: a0, leny: b0 };
    bands[start + 1] = Subband { x: x + a0, y, lenx: a1, leny: b0 };
    bands[start + 2] = Subband { x, y: y + b0, lenx: a0, leny: b1 };
    bands[start + 3] = Subband { x: x + a0, y: y + b0, lenx: a1, leny: b1 };
}

/// Later splits overwrite overlapping entries of earlier ones.
pub fn subband_tree(nodes: &WaveletTree) -> SubbandTree {
    let mut bands = [Subband::default(); SUBBANDS];
    split_sixteen(&mut bands, 3, &nodes[14], false, false);
    split_sixteen(&mut bands, 19, &nodes[4], false, true);
    split_sixteen(&mut bands, 48, &nodes[0], false, false);
    split_sixteen(&mut bands, 35, &nodes[5], true, false);
    split_four(&mut bands, 0, &nodes[19]);
    bands
}
