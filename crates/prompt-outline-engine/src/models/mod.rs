pub mod node;

pub use node::TreeNode;
