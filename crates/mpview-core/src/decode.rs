//! Single-pass decode driver.
//!
//! One forward pass over the buffer: classify the tag, read its payload,
//! insert the node(s), let the frame stack close whatever completed, repeat
//! until the cursor is exhausted or a read fails. No recursion per nesting
//! level; adversarial depth is bounded by [`DecodeLimits`], not by the call
//! stack.

use crate::msgpack::error::DecodeError;
use crate::msgpack::parser::{ItemShape, read_item};
use crate::msgpack::reader::ByteCursor;
use crate::tree::builder::TreeBuilder;
use crate::tree::{Node, Tree};

/// Ceilings bounding adversarial inputs (huge declared counts, deep
/// nesting). Defaults are generous for real files. The returned tree never
/// holds more than `max_nodes` nodes; string headers count toward
/// `max_depth` like any other container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_nodes: usize,
    pub max_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            max_depth: 1_024,
        }
    }
}

/// Decode a MessagePack buffer into a labeled, offset-tagged node tree.
///
/// Strict form: truncation, an incomplete trailing container, or an
/// exceeded ceiling all come back as `Err`. Use [`decode_partial`] to also
/// obtain the tree built up to the failure point.
///
/// # Examples
/// ```
/// use mpview_core::decode;
///
/// // array of one array of one integer
/// let tree = decode(&[0x91, 0x91, 0x01])?;
/// assert_eq!(tree.nodes.len(), 1);
/// assert_eq!(tree.nodes[0].children[0].children[0].label, "positive fixint: 1");
/// # Ok::<(), mpview_core::DecodeError>(())
/// ```
pub fn decode(input: &[u8]) -> Result<Tree, DecodeError> {
    let (tree, error) = decode_partial(input);
    match error {
        None => Ok(tree),
        Some(err) => Err(err),
    }
}

/// Decode as far as possible, returning the tree built so far together with
/// the error that stopped the pass, if any.
///
/// `IncompleteStructure` leaves the partially filled containers in the
/// tree so a shell can still render them (marked incomplete). Truncation
/// adds no node for the in-progress tag.
pub fn decode_partial(input: &[u8]) -> (Tree, Option<DecodeError>) {
    decode_with_limits(input, DecodeLimits::default())
}

/// [`decode_partial`] with explicit ceilings.
pub fn decode_with_limits(input: &[u8], limits: DecodeLimits) -> (Tree, Option<DecodeError>) {
    let mut cursor = ByteCursor::new(input);
    let mut builder = TreeBuilder::new();
    let mut nodes_total = 0usize;

    while cursor.remaining() > 0 {
        let item = match read_item(&mut cursor) {
            Ok(item) => item,
            Err(err) => return (builder.finish(), Some(err)),
        };

        // a string inserts a header plus its text leaf in one step
        let needed = match item.shape {
            ItemShape::Text { .. } => 2,
            _ => 1,
        };
        if nodes_total + needed > limits.max_nodes {
            return (
                builder.finish(),
                Some(DecodeError::TooManyNodes {
                    limit: limits.max_nodes,
                }),
            );
        }

        match item.shape {
            ItemShape::Leaf => {
                builder.insert_leaf(Node::leaf(item.label, item.offset));
                nodes_total += 1;
            }
            ItemShape::Container { expected } => {
                if builder.depth() >= limits.max_depth {
                    return (
                        builder.finish(),
                        Some(DecodeError::TooDeep {
                            limit: limits.max_depth,
                        }),
                    );
                }
                builder.insert_container(Node::container(item.label, item.offset), expected);
                nodes_total += 1;
            }
            ItemShape::Text { text } => {
                // the header opens a frame like any other container
                if builder.depth() >= limits.max_depth {
                    return (
                        builder.finish(),
                        Some(DecodeError::TooDeep {
                            limit: limits.max_depth,
                        }),
                    );
                }
                // header frame expects exactly one child; the text leaf
                // satisfies and closes it in the same step
                builder.insert_container(Node::container(item.label, item.offset), 1);
                builder.insert_leaf(Node::leaf(text, item.offset));
                nodes_total += 2;
            }
        }
    }

    let open = builder.open_frames();
    let tree = builder.finish();
    if open > 0 {
        return (tree, Some(DecodeError::IncompleteStructure { open_frames: open }));
    }
    (tree, None)
}

#[cfg(test)]
mod tests {
    use super::{DecodeLimits, decode, decode_partial, decode_with_limits};
    use crate::msgpack::error::DecodeError;

    #[test]
    fn truncated_uint16_yields_error_and_no_spurious_leaf() {
        let (tree, error) = decode_partial(&[0xcd]);
        assert!(tree.is_empty());
        assert_eq!(
            error,
            Some(DecodeError::TruncatedInput {
                offset: 1,
                needed: 2,
                remaining: 0,
            })
        );
    }

    #[test]
    fn truncation_keeps_nodes_decoded_before_the_failure() {
        let (tree, error) = decode_partial(&[0x05, 0xcd]);
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].label, "positive fixint: 5");
        assert!(matches!(error, Some(DecodeError::TruncatedInput { .. })));
    }

    #[test]
    fn incomplete_container_is_returned_partially_filled() {
        let (tree, error) = decode_partial(&[0x92, 0x01]);
        assert_eq!(error, Some(DecodeError::IncompleteStructure { open_frames: 1 }));
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].children.len(), 1);
        assert!(decode(&[0x92, 0x01]).is_err());
    }

    #[test]
    fn depth_ceiling_stops_runaway_nesting() {
        let input = vec![0x91u8; 64];
        let limits = DecodeLimits {
            max_nodes: 1_000,
            max_depth: 8,
        };
        let (tree, error) = decode_with_limits(&input, limits);
        assert_eq!(error, Some(DecodeError::TooDeep { limit: 8 }));
        assert_eq!(tree.max_depth(), 8);
    }

    #[test]
    fn node_ceiling_stops_runaway_streams() {
        let input = vec![0x01u8; 32];
        let limits = DecodeLimits {
            max_nodes: 10,
            max_depth: 8,
        };
        let (tree, error) = decode_with_limits(&input, limits);
        assert_eq!(error, Some(DecodeError::TooManyNodes { limit: 10 }));
        assert_eq!(tree.nodes.len(), 10);
    }

    #[test]
    fn depth_ceiling_applies_to_string_headers() {
        // eight nested fixarrays, then a one-byte fixstr at the ceiling
        let mut input = vec![0x91u8; 8];
        input.extend_from_slice(&[0xa1, b'x']);
        let limits = DecodeLimits {
            max_nodes: 1_000,
            max_depth: 8,
        };
        let (tree, error) = decode_with_limits(&input, limits);
        assert_eq!(error, Some(DecodeError::TooDeep { limit: 8 }));
        assert_eq!(tree.max_depth(), 8);
    }

    #[test]
    fn node_ceiling_rejects_string_that_would_overshoot() {
        // two scalars, then a string needing two nodes with one slot left
        let input = [0x01, 0x02, 0xa1, b'x'];
        let limits = DecodeLimits {
            max_nodes: 3,
            max_depth: 8,
        };
        let (tree, error) = decode_with_limits(&input, limits);
        assert_eq!(error, Some(DecodeError::TooManyNodes { limit: 3 }));
        assert_eq!(tree.nodes.len(), 2);
    }

    #[test]
    fn deep_nesting_within_limits_does_not_recurse() {
        // 600 nested fixarrays closed by a single leaf; would overflow a
        // recursive decoder long before an explicit stack notices
        let mut input = vec![0x91u8; 600];
        input.push(0x01);
        let tree = decode(&input).expect("decode nested");
        assert_eq!(tree.max_depth(), 601);
    }
}
