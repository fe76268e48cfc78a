//! JSON Patch diff: generate a JSON Patch from two trees.
//!
//! Maps are compared key by key. Lists are aligned with an edit-distance
//! table over element equality, so an inserted or deleted element becomes
//! a single `add` or `remove` instead of a cascade of replacements. All
//! other differences, including a change of shape, become one `replace`.
//!
//! A [`DiffHook`] can take over any node pair: returning `Some(ops)` emits
//! `ops` verbatim in place of the built-in comparison at that position.

use tracing::trace;
use ypatch_json_pointer::Pointer;

use crate::json_patch::types::Op;
use crate::tree::{node_equal, Node, Shape};

/// Per-node override. Receives the input node, the output node and the
/// pointer of their position; `None` falls back to the built-in diff.
pub type DiffHook<'h, A, B> = dyn Fn(&A, &B, &Pointer) -> Option<Vec<Op>> + 'h;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Largest `input.len() * output.len()` for which lists are aligned
    /// element by element. Larger lists are replaced as a whole.
    pub array_edit_limit: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            array_edit_limit: 1 << 20,
        }
    }
}

/// One step of a list alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Keep,
    Remove,
    Add,
    Replace,
}

/// Recursive tree differ.
pub struct Differ<'h, A, B> {
    hook: Option<&'h DiffHook<'h, A, B>>,
    options: DiffOptions,
}

impl<A: Node, B: Node> Default for Differ<'_, A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, A: Node, B: Node> Differ<'h, A, B> {
    pub fn new() -> Self {
        Self {
            hook: None,
            options: DiffOptions::default(),
        }
    }

    pub fn with_hook(mut self, hook: &'h DiffHook<'h, A, B>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Operations that turn `input` into `output`.
    pub fn diff(&self, input: &A, output: &B) -> Vec<Op> {
        let mut ops = Vec::new();
        self.diff_at(&mut ops, &Pointer::root(), input, output);
        ops
    }

    fn diff_at(&self, ops: &mut Vec<Op>, ptr: &Pointer, input: &A, output: &B) {
        if let Some(hook) = self.hook {
            if let Some(custom) = hook(input, output, ptr) {
                trace!(path = %ptr, ops = custom.len(), "diff hook override");
                ops.extend(custom);
                return;
            }
        }
        match (input.shape(), output.shape()) {
            (Shape::Map, Shape::Map) => self.diff_maps(ops, ptr, input, output),
            (Shape::List, Shape::List) => self.diff_lists(ops, ptr, input, output),
            _ => {
                if !node_equal(input, output) {
                    ops.push(Op::Replace {
                        path: ptr.clone(),
                        value: output.to_value(),
                    });
                }
            }
        }
    }

    fn diff_maps(&self, ops: &mut Vec<Op>, ptr: &Pointer, input: &A, output: &B) {
        for key in input.keys() {
            if output.get(&key).is_none() {
                ops.push(Op::Remove {
                    path: ptr.child(key),
                });
            }
        }
        for key in output.keys() {
            let Some(out_child) = output.get(&key) else {
                continue;
            };
            match input.get(&key) {
                None => ops.push(Op::Add {
                    path: ptr.child(key),
                    value: out_child.to_value(),
                }),
                Some(in_child) => self.diff_at(ops, &ptr.child(key), &in_child, &out_child),
            }
        }
    }

    fn diff_lists(&self, ops: &mut Vec<Op>, ptr: &Pointer, input: &A, output: &B) {
        let xs: Vec<A> = (0..input.len()).filter_map(|i| input.index(i)).collect();
        let ys: Vec<B> = (0..output.len()).filter_map(|i| output.index(i)).collect();

        let within_limit = xs
            .len()
            .checked_mul(ys.len())
            .is_some_and(|cells| cells <= self.options.array_edit_limit);
        if !within_limit {
            if !node_equal(input, output) {
                ops.push(Op::Replace {
                    path: ptr.clone(),
                    value: output.to_value(),
                });
            }
            return;
        }

        let (mut i, mut j) = (0, 0);
        for edit in align(&xs, &ys) {
            // Elements before `j` already match the output, and the input
            // elements from `i` on follow them.
            let current_len = j + (xs.len() - i);
            match edit {
                Edit::Keep => {
                    i += 1;
                    j += 1;
                }
                Edit::Remove => {
                    ops.push(Op::Remove {
                        path: ptr.child(j.to_string()),
                    });
                    i += 1;
                }
                Edit::Add => {
                    let token = if j == current_len {
                        "-".to_string()
                    } else {
                        j.to_string()
                    };
                    ops.push(Op::Add {
                        path: ptr.child(token),
                        value: ys[j].to_value(),
                    });
                    j += 1;
                }
                Edit::Replace => {
                    self.diff_at(ops, &ptr.child(j.to_string()), &xs[i], &ys[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
    }
}

/// Minimum-cost edit script turning `xs` into `ys`.
///
/// `dist[i][j]` is the cost of turning `xs[i..]` into `ys[j..]`, with add,
/// remove and replace costing 1 and equal elements 0. The script is read
/// forwards from `(0, 0)`; on ties removals come first, then additions,
/// then replacements.
fn align<A: Node, B: Node>(xs: &[A], ys: &[B]) -> Vec<Edit> {
    let (n, m) = (xs.len(), ys.len());
    let width = m + 1;
    let equal: Vec<bool> = xs
        .iter()
        .flat_map(|x| ys.iter().map(move |y| node_equal(x, y)))
        .collect();
    let is_equal = |i: usize, j: usize| equal[i * m + j];

    let mut dist = vec![0u32; (n + 1) * width];
    for i in (0..=n).rev() {
        for j in (0..=m).rev() {
            dist[i * width + j] = if i == n {
                (m - j) as u32
            } else if j == m {
                (n - i) as u32
            } else if is_equal(i, j) {
                dist[(i + 1) * width + j + 1]
            } else {
                1 + dist[(i + 1) * width + j]
                    .min(dist[i * width + j + 1])
                    .min(dist[(i + 1) * width + j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        let here = dist[i * width + j];
        let edit = if i < n && j < m && is_equal(i, j) {
            Edit::Keep
        } else if i < n && here == 1 + dist[(i + 1) * width + j] {
            Edit::Remove
        } else if j < m && here == 1 + dist[i * width + j + 1] {
            Edit::Add
        } else {
            Edit::Replace
        };
        match edit {
            Edit::Keep | Edit::Replace => {
                i += 1;
                j += 1;
            }
            Edit::Remove => i += 1,
            Edit::Add => j += 1,
        }
        edits.push(edit);
    }
    edits
}

// ── Tests ─────────────────────────────────────────────────────────────────
