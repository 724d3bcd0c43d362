use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use csv_core::{ReadRecordResult, Reader, ReaderBuilder};

use crate::{DBError, DBResult};

const INITIAL_OUTPUT_BUF_SIZE: usize = 4096;
const INITIAL_NUM_FIELDS: usize = 64;

/// Reads a comma-delimited file one record at a time.
pub struct CsvRecordReader {
    buf_reader: BufReader<File>,
    inputs_buf: Vec<u8>,
    inputs_pos: usize,
    eof: bool,
    finished: bool,
    outputs_buf: Vec<u8>,
    field_indices: Vec<usize>,
    csv_reader: Reader,
}

impl CsvRecordReader {
    pub fn new(path: &Path) -> DBResult<Self> {
        let csv_reader = ReaderBuilder::new().build();
        let f = File::open(path).map_err(|e| {
            DBError::StorageEngine(format!("open {} failed: {e}", path.display()))
        })?;
        Ok(Self {
            buf_reader: BufReader::new(f),
            inputs_buf: Vec::with_capacity(INITIAL_OUTPUT_BUF_SIZE),
            inputs_pos: 0,
            eof: false,
            finished: false,
            outputs_buf: vec![0; INITIAL_OUTPUT_BUF_SIZE],
            field_indices: vec![0; INITIAL_NUM_FIELDS],
            csv_reader,
        })
    }

    /// Next record as raw text fields, `None` once the file is exhausted.
    pub fn try_read_next(&mut self) -> DBResult<Option<Vec<String>>> {
        if self.finished {
            return Ok(None);
        }
        let mut num_written = 0;
        let mut num_ends = 0;
        loop {
            if self.inputs_pos >= self.inputs_buf.len() && !self.eof {
                self.fill_inputs()?;
            }
            let inputs = &self.inputs_buf[self.inputs_pos..];
            let (result, num_read, num_write, num_fields) = self.csv_reader.read_record(
                inputs,
                &mut self.outputs_buf[num_written..],
                &mut self.field_indices[num_ends..],
            );
            self.inputs_pos += num_read;
            num_written += num_write;
            num_ends += num_fields;

            match result {
                // an empty slice at eof makes csv-core flush the pending record
                ReadRecordResult::InputEmpty => continue,
                ReadRecordResult::OutputFull => {
                    let len = self.outputs_buf.len();
                    self.outputs_buf.resize(len * 2, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    let len = self.field_indices.len();
                    self.field_indices.resize(len * 2, 0);
                }
                ReadRecordResult::Record => {
                    let mut offset = 0;
                    let record = self.field_indices[..num_ends]
                        .iter()
                        .map(|&end| {
                            // from_utf8_lossy will check the UTF-8 validity against the bytes
                            let v = String::from_utf8_lossy(&self.outputs_buf[offset..end]);
                            offset = end;
                            v.to_string()
                        })
                        .collect();
                    return Ok(Some(record));
                }
                ReadRecordResult::End => {
                    self.finished = true;
                    return Ok(None);
                }
            }
        }
    }

    fn fill_inputs(&mut self) -> DBResult<()> {
        self.inputs_buf.clear();
        self.inputs_pos = 0;
        let num_read = self
            .buf_reader
            .read_until(b'\n', &mut self.inputs_buf)
            .map_err(|e| DBError::StorageEngine(format!("read csv file error: {e}")))?;
        if num_read == 0 {
            self.eof = true;
        }
        Ok(())
    }
}
