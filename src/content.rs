use crate::layout::Placement;
use crate::writer::Writer;
use crate::{Object, Result};

#[derive(Debug, Clone)]
pub struct Operation {
    /// The operator in postfix notation.
    pub operator: String,
    pub operands: Vec<Object>,
}

impl Operation {
    pub fn new(operator: &str, operands: Vec<Object>) -> Operation {
        Operation {
            operator: operator.to_string(),
            operands,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Content {
    pub operations: Vec<Operation>,
}

impl Content {
    /// Encode the operations as content-stream bytes. The byte count of the
    /// result becomes the stream's `Length`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        for operation in &self.operations {
            for operand in &operation.operands {
                Writer::write_object(&mut bytes, operand)?;
                bytes.push(b' ');
            }
            bytes.extend_from_slice(operation.operator.as_bytes());
            bytes.push(b'\n');
        }
        Ok(bytes)
    }
}

/// Operator program that paints a single image XObject onto a page: save the
/// graphics state, map the unit square onto the placement box, invoke the
/// named image, restore.
pub fn page_program(placement: &Placement, xobject_name: &str) -> Content {
    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    placement.width.into(),
                    0.into(),
                    0.into(),
                    placement.height.into(),
                    placement.x.into(),
                    placement.y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(xobject_name.into())]),
            Operation::new("Q", vec![]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_operands_before_operator() {
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new("cm", vec![2.into(), 0.into(), 0.into(), 2.into(), 10.into(), 20.into()]),
                Operation::new("Q", vec![]),
            ],
        };
        assert_eq!(content.encode().unwrap(), b"q\n2 0 0 2 10 20 cm\nQ\n");
    }

    #[test]
    fn page_program_names_the_xobject() {
        let placement = Placement {
            scale: 1.0,
            width: 100.0,
            height: 50.0,
            x: 10.0,
            y: 20.0,
        };
        let bytes = page_program(&placement, "I1").encode().unwrap();
        assert_eq!(bytes, b"q\n100.00 0 0 50.00 10.00 20.00 cm\n/I1 Do\nQ\n");
    }
}
