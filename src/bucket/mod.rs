mod core;


pub use self::core::{
    BUCKETS, BucketLayout, bucket_index, count_buckets, exclusive_prefix_sum, scatter_buckets,
    scatter_counting, split_at_lengths,
};
