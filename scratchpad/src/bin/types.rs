use growable::prelude::*;

fn main() -> Result<(), IndexOutOfRange> {
  let mut array = GrowableArray::<u32>::with_capacity(2).with_growth_strategy(GrowthStrategy::Exponential);
  array.push_within_capacity(1).unwrap();
  array.push_within_capacity(2).unwrap();
  assert_eq!(array.push_within_capacity(3), Err(3));
  array.add(3);
  array.insert(0, 0)?;

  println!("{array:?} (capacity {})", array.capacity());

  for (index, value) in array.indexed() {
    println!("{index}: {value}");
  }

  if let Err(error) = array.get(10) {
    println!("{error}");
  }

  array.pop_front();
  println!("{:?}", array.slice(1..)?);

  Ok(())
}
